/*
 * Responsibility
 * - Gallery の request/response DTO
 * - login (tenant key) は返さない / 受け取らない: 常に検証済み Identity から決まる
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::GalleryRow;

#[derive(Debug, Deserialize)]
pub struct UpdateGalleryRequest {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl UpdateGalleryRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GalleryRow> for GalleryResponse {
    fn from(row: GalleryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        }
    }
}
