use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::Identity;

/// Handler で、検証済みの Identity を受け取るための extractor
///
/// The identity guard has inserted it into the request extensions. If it is absent
/// the route was mounted without the guard; that is treated as unauthenticated (403).
#[derive(Debug, Clone)]
pub struct AuthIdentity(pub Identity);

impl<S> FromRequestParts<S> for AuthIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthIdentity)
            .ok_or(AppError::Forbidden)
    }
}
