use axum::Json;
use serde_json::{Value, json};

use crate::api::extractors::AuthIdentity;

/// GET /: authenticated greeting.
pub async fn home(AuthIdentity(identity): AuthIdentity) -> Json<Value> {
    Json(json!({
        "message": "Welcome home!",
        "login": identity.login,
    }))
}
