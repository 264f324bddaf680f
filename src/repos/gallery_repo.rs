/*
 * Responsibility
 * - gallery テーブル向け SQLx 操作
 * - Every statement is scoped by the caller's login (1 gallery per login)
 * - get-or-create: a missing gallery is provisioned, not reported
 */
use chrono::NaiveDateTime;
use sqlx::{FromRow, SqlitePool};

use crate::repos::error::{RepoError, RepoResult, expect_inserted, expect_owned_row};
use crate::services::auth::Identity;

pub const DEFAULT_TITLE: &str = "The Empty gallery";
pub const DEFAULT_DESCRIPTION: &str = "This gallery is in desparate need of some art!";

#[derive(Debug, Clone, FromRow)]
pub struct GalleryRow {
    pub id: i64,
    pub login: String,
    pub title: String,
    pub description: String,
    // CURRENT_TIMESTAMP, stored as UTC without offset
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct GalleryRepo {
    pool: SqlitePool,
}

impl GalleryRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_login(&self, login: &str) -> RepoResult<Option<GalleryRow>> {
        let row = sqlx::query_as::<_, GalleryRow>(
            r#"
            SELECT id, login, title, description, created_at, updated_at
            FROM gallery
            WHERE login = ?1
            "#,
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    /// Look the caller's gallery up, creating the placeholder one on first use.
    ///
    /// Two first requests of the same login can both miss the lookup. The UNIQUE
    /// constraint on `login` makes the second insert fail with `Conflict`; that
    /// caller re-reads the row the winner created instead of duplicating it.
    pub async fn get_or_create(&self, identity: &Identity) -> RepoResult<GalleryRow> {
        if let Some(row) = self.find_by_login(&identity.login).await? {
            return Ok(row);
        }

        match self
            .create(identity, DEFAULT_TITLE, DEFAULT_DESCRIPTION)
            .await
        {
            Ok(id) => {
                tracing::info!(login = %identity.login, gallery_id = id, "gallery provisioned");
            }
            Err(RepoError::Conflict) => {
                tracing::debug!(login = %identity.login, "gallery created concurrently, re-reading");
            }
            Err(e) => return Err(e),
        }

        self.find_by_login(&identity.login)
            .await?
            .ok_or(RepoError::Inconsistent {
                op: "get-or-create gallery",
                affected: 0,
            })
    }

    /// Insert a gallery owned by `identity.login`; returns the generated id.
    ///
    /// A second gallery for the same login is rejected with `Conflict`.
    pub async fn create(
        &self,
        identity: &Identity,
        title: &str,
        description: &str,
    ) -> RepoResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO gallery (login, title, description)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&identity.login)
        .bind(title)
        .bind(description)
        .execute(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        expect_inserted(result.rows_affected(), "create gallery")?;

        Ok(result.last_insert_rowid())
    }

    /// Change title/description of the caller's own gallery.
    ///
    /// Both `id` and the login are in the predicate; a foreign or unknown id
    /// matches nothing and fails with `NotFoundOrForbidden`.
    pub async fn update(
        &self,
        identity: &Identity,
        id: i64,
        title: &str,
        description: &str,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE gallery
            SET
                title = ?1,
                description = ?2,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?3 AND login = ?4
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(id)
        .bind(&identity.login)
        .execute(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        expect_owned_row(result.rows_affected(), "update gallery")
    }
}
