/*
 * Responsibility
 * - art_piece CRUD
 * - The gallery passed in is already resolved for the caller, so scoping by
 *   gallery_id is enough; every mutation keys on (id, gallery_id)
 * - gallery_id の FK (CASCADE) 前提で削除挙動を意識
 * - stars range (0..=3) is enforced by the table CHECK, not here
 */
use chrono::NaiveDateTime;
use sqlx::{FromRow, SqlitePool};

use crate::repos::error::{RepoError, RepoResult, expect_inserted, expect_owned_row};
use crate::repos::gallery_repo::GalleryRow;

pub const DEFAULT_STARS: i64 = 0;

#[derive(Debug, Clone, FromRow)]
pub struct ArtPieceRow {
    pub id: i64,
    pub gallery_id: i64,
    pub title: String,
    pub description: String,
    pub uri: String,
    pub stars: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Client-writable fields of an art piece.
///
/// Update is a full replace: an unset `stars` is written as the default, not kept.
#[derive(Debug, Clone, Default)]
pub struct ArtPieceFields {
    pub title: String,
    pub description: String,
    pub uri: String,
    pub stars: Option<i64>,
}

impl ArtPieceFields {
    fn stars_or_default(&self) -> i64 {
        self.stars.unwrap_or(DEFAULT_STARS)
    }
}

#[derive(Clone, Debug)]
pub struct ArtPieceRepo {
    pool: SqlitePool,
}

impl ArtPieceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, gallery_id: i64, art_piece_id: i64) -> RepoResult<ArtPieceRow> {
        sqlx::query_as::<_, ArtPieceRow>(
            r#"
            SELECT
                id, gallery_id, title, description, uri, stars, created_at, updated_at
            FROM art_piece
            WHERE gallery_id = ?1 AND id = ?2
            "#,
        )
        .bind(gallery_id)
        .bind(art_piece_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?
        .ok_or(RepoError::NotFound {
            resource: "art piece",
        })
    }

    /// All pieces of the gallery in insertion order. Empty is not an error.
    pub async fn list(&self, gallery_id: i64) -> RepoResult<Vec<ArtPieceRow>> {
        let rows = sqlx::query_as::<_, ArtPieceRow>(
            r#"
            SELECT
                id, gallery_id, title, description, uri, stars, created_at, updated_at
            FROM art_piece
            WHERE gallery_id = ?1
            ORDER BY id ASC
            "#,
        )
        .bind(gallery_id)
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(rows)
    }

    /// Insert into `gallery`; returns the generated id.
    pub async fn create(&self, gallery: &GalleryRow, fields: &ArtPieceFields) -> RepoResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO art_piece (gallery_id, title, description, uri, stars)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(gallery.id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.uri)
        .bind(fields.stars_or_default())
        .execute(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        expect_inserted(result.rows_affected(), "create art piece")?;

        Ok(result.last_insert_rowid())
    }

    pub async fn update(
        &self,
        gallery: &GalleryRow,
        art_piece_id: i64,
        fields: &ArtPieceFields,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE art_piece
            SET
                title = ?1,
                description = ?2,
                stars = ?3,
                uri = ?4,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?5 AND gallery_id = ?6
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.stars_or_default())
        .bind(&fields.uri)
        .bind(art_piece_id)
        .bind(gallery.id)
        .execute(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        expect_owned_row(result.rows_affected(), "update art piece")
    }

    pub async fn delete(&self, gallery: &GalleryRow, art_piece_id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM art_piece
            WHERE id = ?1 AND gallery_id = ?2
            "#,
        )
        .bind(art_piece_id)
        .bind(gallery.id)
        .execute(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        expect_owned_row(result.rows_affected(), "delete art piece")
    }
}
