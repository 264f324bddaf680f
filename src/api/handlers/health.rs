/*
 * Responsibility
 * - GET /health (疎通用)
 * - identity guard の外側: 認証なし、DB にも触れない
 * - OPTIONS (pre-flight) への空応答もここ
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Answer a CORS pre-flight. The CORS layer adds the headers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
