/*
 * Responsibility
 * - Path の String を受け、内部 ID (i64) に parse する
 * - 失敗時は 400 (parser のメッセージ付き)
 *
 * 置かないもの
 *  - ArtPiece といった具体リソース名 (types.rs 側)
 */
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

#[derive(Clone, Copy)]
pub struct PathId<T> {
    pub id: i64,
    _marker: PhantomData<T>,
}

impl<T> PathId<T> {
    fn new(id: i64) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

fn parse_or_bad_request(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|e| AppError::bad_request("INVALID_ID", format!("invalid id {raw:?}: {e}")))
}

impl<T, S> FromRequestParts<S> for PathId<T>
where
    T: Send + Sync,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::bad_request("INVALID_ID", rejection.body_text()))?;
        let id = parse_or_bad_request(&raw)?;
        Ok(Self::new(id))
    }
}

impl<T> std::fmt::Debug for PathId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathId").field("id", &self.id).finish()
    }
}
