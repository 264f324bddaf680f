#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use octo_gallery::{
    app::build_router,
    db,
    middleware::cors::CorsPolicy,
    services::auth::{Identity, SERVICE_ISSUER, TokenValidator, token_validator::CredentialClaims},
    state::AppState,
};

pub const SECRET: &str = "integration-secret";
pub const ALLOWED_ORIGIN: &str = "https://gallery.example";

/// One app per test: its own in-memory database, nothing shared.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Result<Self> {
        let pool = db::connect_in_memory().await.context("open in-memory db")?;
        db::migrate(&pool).await.context("migrate")?;

        let state = AppState::new(pool.clone(), Arc::new(TokenValidator::new(SECRET, 0)));
        let router = build_router(state, CorsPolicy::new(&[ALLOWED_ORIGIN]));

        Ok(Self { router, pool })
    }

    pub async fn send(&self, req: Request<Body>) -> Result<TestResponse> {
        let res = self.router.clone().oneshot(req).await?;
        let status = res.status();
        let headers = res.headers().clone();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .with_context(|| format!("non-JSON body: {}", String::from_utf8_lossy(&bytes)))?
        };

        Ok(TestResponse {
            status,
            headers,
            body,
        })
    }

    /// Request as `login`, with an optional JSON body.
    pub async fn call(
        &self,
        login: &str,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token_for(login)?));

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body)?).await
    }

    pub async fn count(&self, table: &str) -> Result<i64> {
        let n = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}

pub fn claims_for(login: &str) -> CredentialClaims {
    CredentialClaims {
        iss: SERVICE_ISSUER.into(),
        exp: chrono::Utc::now().timestamp() as u64 + 600,
        nbf: None,
        iat: Some(chrono::Utc::now().timestamp() as u64),
        sub: None,
        profile: Identity {
            login: login.into(),
            name: format!("{login} name"),
            email: format!("{login}@example.com"),
        },
    }
}

pub fn sign(claims: &CredentialClaims, secret: &str) -> Result<String> {
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn token_for(login: &str) -> Result<String> {
    sign(&claims_for(login), SECRET)
}
