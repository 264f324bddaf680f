/*
 * Responsibility
 * - URL 構造を定義
 * - Every route here needs a validated identity; the guard is applied by the caller
 * - OPTIONS is answered on every route so pre-flight requests get a 200
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::handlers::{
    art_pieces::{
        create_art_piece, delete_art_piece, get_art_piece, list_art_pieces, update_art_piece,
    },
    gallery::{get_gallery, update_gallery},
    health::preflight,
    home::home,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home).options(preflight))
        .route(
            "/gallery",
            get(get_gallery).put(update_gallery).options(preflight),
        )
        .route(
            "/gallery/art",
            get(list_art_pieces)
                .post(create_art_piece)
                .options(preflight),
        )
        .route(
            "/gallery/art/{id}",
            get(get_art_piece)
                .put(update_art_piece)
                .delete(delete_art_piece)
                .options(preflight),
        )
}
