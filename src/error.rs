/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - RepoError / request-shape errors を統一的に変換
 * - Auth failures are one opaque FORBIDDEN; the reason is logged, never returned
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("forbidden")]
    Forbidden,
    #[error("request body too large")]
    PayloadTooLarge,
    /// Read of a row that does not exist under the caller's gallery.
    #[error("{resource} seems to be missing")]
    Missing { resource: &'static str },
    /// A mutation did not affect exactly one row (absent, foreign, or inconsistent).
    #[error("unable to complete operation")]
    OperationFailed,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::BadRequest { code, .. } => (StatusCode::BAD_REQUEST, *code),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AppError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            // 500 kept for compatibility with existing clients (see DESIGN.md)
            AppError::Missing { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "RESOURCE_MISSING"),
            AppError::OperationFailed => (StatusCode::INTERNAL_SERVER_ERROR, "OPERATION_FAILED"),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
            ),
        };

        let message = match self {
            AppError::BadRequest { message, .. } => message,
            other => other.to_string(),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::ConstraintViolation(detail) => {
                tracing::info!(%detail, "constraint violation");
                AppError::bad_request("CONSTRAINT_VIOLATION", "value violates a constraint")
            }
            RepoError::NotFound { resource } => AppError::Missing { resource },
            RepoError::NotFoundOrForbidden { .. }
            | RepoError::Inconsistent { .. }
            | RepoError::Conflict => {
                tracing::warn!(error = %e, "postcondition failed");
                AppError::OperationFailed
            }
            RepoError::Db(ref source) => {
                tracing::error!(error = %source, "database error");
                AppError::Internal
            }
        }
    }
}
