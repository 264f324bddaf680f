/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - repos (pool inside), token validator
 * - Built once at startup and injected; nothing in here is mutated afterwards
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::repos::{ArtPieceRepo, GalleryRepo};
use crate::services::auth::TokenValidator;

#[derive(Clone, Debug)]
pub struct AppState {
    pub galleries: GalleryRepo,
    pub art_pieces: ArtPieceRepo,
    pub auth: Arc<TokenValidator>,
}

impl AppState {
    pub fn new(db: SqlitePool, auth: Arc<TokenValidator>) -> Self {
        Self {
            galleries: GalleryRepo::new(db.clone()),
            art_pieces: ArtPieceRepo::new(db),
            auth,
        }
    }
}
