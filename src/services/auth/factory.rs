/// Factory: build `TokenValidator` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::TokenValidator;

pub fn build_token_validator(config: &Config) -> Arc<TokenValidator> {
    tracing::debug!(
        issuer = crate::services::auth::SERVICE_ISSUER,
        leeway_seconds = config.token_leeway_seconds,
        "token validator configured"
    );

    Arc::new(TokenValidator::new(
        &config.auth_secret,
        config.token_leeway_seconds,
    ))
}
