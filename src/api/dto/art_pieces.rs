/*
 * Responsibility
 * - ArtPiece の request/response DTO
 * - Same body for create and update (update is a full replace)
 * - stars の範囲チェックはしない: DB の CHECK 制約に任せる
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::{ArtPieceFields, ArtPieceRow};

#[derive(Debug, Deserialize)]
pub struct ArtPieceRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub uri: String,
    // missing -> default stars (0)
    #[serde(default)]
    pub stars: Option<i64>,
}

impl From<ArtPieceRequest> for ArtPieceFields {
    fn from(req: ArtPieceRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            uri: req.uri,
            stars: req.stars,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArtPieceResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub stars: i64,
    pub uri: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ArtPieceRow> for ArtPieceResponse {
    fn from(row: ArtPieceRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            stars: row.stars,
            uri: row.uri,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        }
    }
}
