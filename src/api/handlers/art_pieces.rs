/*
 * Responsibility
 * - /gallery/art, /gallery/art/{id} の CRUD handler
 * - 先に caller の gallery を get-or-create で解決し、その id で絞り込む
 * - update/delete は対象を一度 get してから変更する (無ければ RESOURCE_MISSING)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::{
        dto::art_pieces::{ArtPieceRequest, ArtPieceResponse},
        extractors::{ArtPieceId, AuthIdentity, JsonBody},
    },
    error::AppError,
    state::AppState,
};

pub async fn list_art_pieces(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
) -> Result<Json<Vec<ArtPieceResponse>>, AppError> {
    let gallery = state.galleries.get_or_create(&identity).await?;
    let rows = state.art_pieces.list(gallery.id).await?;

    Ok(Json(rows.into_iter().map(ArtPieceResponse::from).collect()))
}

pub async fn create_art_piece(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
    JsonBody(req): JsonBody<ArtPieceRequest>,
) -> Result<(StatusCode, Json<ArtPieceResponse>), AppError> {
    let gallery = state.galleries.get_or_create(&identity).await?;

    let id = state.art_pieces.create(&gallery, &req.into()).await?;
    let row = state.art_pieces.get(gallery.id, id).await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_art_piece(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
    art_piece_id: ArtPieceId,
) -> Result<Json<ArtPieceResponse>, AppError> {
    let gallery = state.galleries.get_or_create(&identity).await?;
    let row = state.art_pieces.get(gallery.id, art_piece_id.id).await?;

    Ok(Json(row.into()))
}

pub async fn update_art_piece(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
    art_piece_id: ArtPieceId,
    JsonBody(req): JsonBody<ArtPieceRequest>,
) -> Result<Json<ArtPieceResponse>, AppError> {
    let gallery = state.galleries.get_or_create(&identity).await?;
    let existing = state.art_pieces.get(gallery.id, art_piece_id.id).await?;

    state
        .art_pieces
        .update(&gallery, existing.id, &req.into())
        .await?;

    let row = state.art_pieces.get(gallery.id, existing.id).await?;
    Ok(Json(row.into()))
}

pub async fn delete_art_piece(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
    art_piece_id: ArtPieceId,
) -> Result<StatusCode, AppError> {
    let gallery = state.galleries.get_or_create(&identity).await?;
    let existing = state.art_pieces.get(gallery.id, art_piece_id.id).await?;

    state.art_pieces.delete(&gallery, existing.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
