//! CORS policy for browser clients.
//!
//! Note:
//! - CORS is enforced by browsers. Native apps and server-to-server calls are not
//!   restricted by CORS.
//! - Applied at the Router level, outside the identity guard, so `403` responses are
//!   decorated too.
//!
//! Policy (decided per request, before and independent of authentication):
//! - `Access-Control-Allow-Headers: authorization` always.
//! - Origin in the configured allow-list: echo it back exactly.
//! - Anything else (or no Origin): `Access-Control-Allow-Origin: *`, WITHOUT credentials.
//!
//! `tower_http::cors::CorsLayer` only echoes or omits the origin, so the wildcard
//! fallback is done here by hand.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, Request, header},
    middleware::{self, Next},
    response::Response,
};

const ALLOWED_HEADERS: HeaderValue = HeaderValue::from_static("authorization");
const ALLOWED_METHODS: HeaderValue = HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS");
const ANY_ORIGIN: HeaderValue = HeaderValue::from_static("*");

#[derive(Clone, Debug, Default)]
pub struct CorsPolicy {
    allowed_origins: Vec<HeaderValue>,
}

impl CorsPolicy {
    pub fn new<S: AsRef<str>>(allowed_origins: &[S]) -> Self {
        let allowed_origins = allowed_origins
            .iter()
            .filter_map(|s| match HeaderValue::from_str(s.as_ref()) {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(origin = s.as_ref(), "ignoring unusable allowed origin");
                    None
                }
            })
            .collect();

        Self { allowed_origins }
    }

    /// Value for `Access-Control-Allow-Origin` given the request's `Origin`.
    pub fn allow_origin(&self, origin: Option<&HeaderValue>) -> HeaderValue {
        match origin {
            Some(origin) if self.allowed_origins.iter().any(|v| v == origin) => origin.clone(),
            _ => ANY_ORIGIN,
        }
    }

    /// Write the CORS headers for a request with `origin` and `method` into `headers`.
    pub fn decorate(&self, headers: &mut HeaderMap, origin: Option<&HeaderValue>, method: &Method) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            self.allow_origin(origin),
        );
        if method == Method::OPTIONS {
            headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS);
        }
        if origin.is_some() {
            headers.append(header::VARY, HeaderValue::from_static("origin"));
        }
    }
}

/// Apply CORS policy to the given Router.
pub fn apply(router: Router, policy: CorsPolicy) -> Router {
    router.layer(middleware::from_fn_with_state(
        Arc::new(policy),
        cors_middleware,
    ))
}

async fn cors_middleware(
    State(policy): State<Arc<CorsPolicy>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    // decide from the request before anything downstream can touch it
    let origin = req.headers().get(header::ORIGIN).cloned();
    let method = req.method().clone();

    let mut res = next.run(req).await;
    policy.decorate(res.headers_mut(), origin.as_ref(), &method);
    res
}
