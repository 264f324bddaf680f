//! Identity propagation guard: bearer credential → `Identity` in request extensions.
//!
//! Per request:
//! - `OPTIONS` (CORS pre-flight) passes straight through, no validation.
//! - Forged identity metadata is removed first: the `X-GitHub-*` headers and any
//!   `Identity` already sitting in the extensions.
//! - `TokenValidator` runs; on success the validated `Identity` is inserted and the
//!   request is forwarded. On failure the request stops here with `403`.
//!
//! Handlers read the identity only through `AuthIdentity`, never from headers.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::{Identity, identity::strip_identity_headers};
use crate::state::AppState;

/// Put the guard in front of every route of `router`.
///
/// 例：
/// ```ignore
/// let protected = middleware::auth::identity::apply(api::routes(), state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, identity_guard))
}

async fn identity_guard(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    strip_identity_headers(req.headers_mut());
    req.extensions_mut().remove::<Identity>();

    let identity = match state.auth.validate_headers(req.headers()) {
        Ok(identity) => identity,
        Err(err) => {
            // the reason stays in the log; the caller only sees 403
            tracing::warn!(
                error = %err,
                method = %req.method(),
                path = %req.uri().path(),
                "bearer credential rejected"
            );
            return Err(AppError::Forbidden);
        }
    };

    tracing::debug!(login = %identity.login, "identity attached");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
