/*
 * Responsibility
 * - Load configuration once at startup (JSON file given on the command line, or env)
 * - Validate values (missing/invalid -> startup fails)
 * - Read-only after startup: secret, allow-list, datastore location, bind address
 */
use std::fmt;
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(std::env::var("APP_ENV").ok().as_deref())
    }

    fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
    Unreadable(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
            ConfigError::Unreadable(reason) => {
                write!(f, "configuration file unreadable: {}", reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth_secret: String,
    pub token_leeway_seconds: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the signing secret
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("token_leeway_seconds", &self.token_leeway_seconds)
            .finish()
    }
}

/// On-disk format: `{"host", "port", "database", "secret", "allowed-origins"}`.
#[derive(Debug, Deserialize)]
struct FileConfig {
    host: String,
    port: u16,
    database: String,
    secret: String,
    #[serde(rename = "allowed-origins", default)]
    allowed_origins: Vec<String>,
}

impl Config {
    /// First command-line argument wins; otherwise the environment (and `.env`).
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::args().nth(1) {
            Some(path) => Self::from_file(path),
            None => Self::from_env(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from key/value pairs; `lookup` stands in for the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port: u16 = match lookup("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8080,
        };

        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let auth_secret = lookup("AUTH_SECRET")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("AUTH_SECRET"))?;

        let cors_allowed_origins =
            split_origins(&lookup("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        Self {
            host,
            port,
            database_url,
            app_env: AppEnv::parse(lookup("APP_ENV").as_deref()),
            cors_allowed_origins,
            auth_secret,
            token_leeway_seconds: leeway(&lookup)?,
        }
        .validated()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Unreadable(e.to_string()))?;
        let file: FileConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::Unreadable(e.to_string()))?;

        Self {
            host: file.host,
            port: file.port,
            database_url: file.database,
            app_env: AppEnv::from_env(),
            cors_allowed_origins: file
                .allowed_origins
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            auth_secret: file.secret,
            token_leeway_seconds: leeway(&|key: &str| std::env::var(key).ok())?,
        }
        .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host"));
        }
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Missing("database"));
        }
        if self.auth_secret.is_empty() {
            return Err(ConfigError::Missing("secret"));
        }
        Ok(self)
    }
}

const DEFAULT_LEEWAY_SECONDS: u64 = 60;

fn leeway(lookup: &impl Fn(&str) -> Option<String>) -> Result<u64, ConfigError> {
    match lookup("TOKEN_LEEWAY_SECONDS") {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid("TOKEN_LEEWAY_SECONDS")),
        None => Ok(DEFAULT_LEEWAY_SECONDS),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
