/*
 * Responsibility
 * - /gallery (GET: get-or-create, PUT: update)
 * - 対象 gallery は常に AuthIdentity から決まる (path/body の login は使わない)
 */
use axum::{Json, extract::State};

use crate::{
    api::{
        dto::gallery::{GalleryResponse, UpdateGalleryRequest},
        extractors::{AuthIdentity, JsonBody},
    },
    error::AppError,
    repos::RepoError,
    state::AppState,
};

pub async fn get_gallery(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
) -> Result<Json<GalleryResponse>, AppError> {
    let row = state.galleries.get_or_create(&identity).await?;

    Ok(Json(row.into()))
}

pub async fn update_gallery(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
    JsonBody(req): JsonBody<UpdateGalleryRequest>,
) -> Result<Json<GalleryResponse>, AppError> {
    req.validate()
        .map_err(|message| AppError::bad_request("BAD_REQUEST", message))?;

    state
        .galleries
        .update(&identity, req.id, &req.title, &req.description)
        .await?;

    let row = state
        .galleries
        .find_by_login(&identity.login)
        .await?
        .ok_or(RepoError::Inconsistent {
            op: "update gallery",
            affected: 0,
        })?;

    Ok(Json(row.into()))
}
