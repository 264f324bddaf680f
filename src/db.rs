/*
 * Responsibility
 * - Open the SQLite pool (file path, sqlite: URL or :memory:)
 * - Apply the embedded migrations (gallery / art_piece)
 * - Called once at startup; the pool is then injected into the repos
 */
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

const MEMORY: &[&str] = &[":memory:", "sqlite::memory:", "sqlite://:memory:"];

pub async fn connect(database: &str) -> Result<SqlitePool, sqlx::Error> {
    if MEMORY.contains(&database) {
        return connect_in_memory().await;
    }

    let options = if database.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(database)?
    } else {
        SqliteConnectOptions::new().filename(database)
    }
    .create_if_missing(true)
    .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Every in-memory connection is its own database, so the pool holds exactly one
/// connection and never recycles it.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_schema_has_both_tables() {
        let pool = connect(":memory:").await.unwrap();
        migrate(&pool).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('gallery', 'art_piece') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        assert_eq!(tables, vec!["art_piece", "gallery"]);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = connect_in_memory().await.unwrap();
        migrate(&pool).await.unwrap();
        migrate(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn file_database_is_created() {
        let path = std::env::temp_dir().join(format!("octo-gallery-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let pool = connect(path.to_str().unwrap()).await.unwrap();
        migrate(&pool).await.unwrap();
        pool.close().await;

        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }
}
