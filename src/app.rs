/*
 * Responsibility
 * - Config読み込み → 依存生成 (pool, migrations, token validator) → Router 組み立て
 * - Middleware の適用順: CORS (最外) → request-id/trace/limit → identity guard → routes
 * - axum::serve() で起動
 */
use std::{panic, process};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, handlers::health::health, handlers::health::preflight};
use crate::config::Config;
use crate::db;
use crate::middleware::{self, cors::CorsPolicy};
use crate::services::auth::build_token_validator;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,octo_gallery=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: fail fast. production: default hook, server keeps running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::load()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting gallery API in {:?} mode on {}:{}",
        config.app_env,
        config.host,
        config.port
    );

    let state = build_state(&config).await?;
    let cors = CorsPolicy::new(&config.cors_allowed_origins);
    let app = build_router(state, cors);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("unable to bind {}:{}", config.host, config.port))?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let pool = db::connect(&config.database_url)
        .await
        .with_context(|| format!("unable to open database {}", config.database_url))?;
    db::migrate(&pool).await.context("unable to apply migrations")?;
    tracing::info!("database ready");

    let auth = build_token_validator(config);

    Ok(AppState::new(pool, auth))
}

/// Assemble the full HTTP surface for `state`.
///
/// `/health` stays outside the identity guard; everything from `api::routes()` is
/// behind it. CORS wraps the whole thing so rejected requests are decorated too.
pub fn build_router(state: AppState, cors: CorsPolicy) -> Router {
    let protected = middleware::auth::identity::apply(api::routes(), state.clone());

    let router = Router::new()
        .route("/health", get(health).options(preflight))
        .merge(protected)
        .with_state(state);

    let router = middleware::http::apply(router);
    middleware::cors::apply(router, cors)
}
