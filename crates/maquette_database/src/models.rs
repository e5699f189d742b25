//! Database row models for jobs, assets, and renditions.

use crate::schema::{asset_renditions, assets, generation_jobs};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use maquette_core::{AssetRecord, JobRecord, RenditionRecord};
use maquette_error::{DatabaseError, DatabaseErrorKind};
use uuid::Uuid;

/// A generation job row.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = generation_jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct JobRow {
    pub id: Uuid,
    pub prompt_summary: String,
    pub negative_prompt: Option<String>,
    pub style_preset: Option<String>,
    pub size: String,
    pub status: String,
    pub progress: i32,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// New job row for insertion. The id and created_at come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = generation_jobs)]
pub struct NewJobRow {
    pub prompt_summary: String,
    pub negative_prompt: Option<String>,
    pub style_preset: Option<String>,
    pub size: String,
    pub status: String,
    pub progress: i32,
}

/// An asset row. Append-only.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = assets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssetRow {
    pub id: Uuid,
    pub job_id: Option<Uuid>,
    pub asset_type: String,
    pub title: Option<String>,
    pub prompt: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// New asset row for insertion.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = assets)]
pub struct NewAssetRow {
    pub job_id: Option<Uuid>,
    pub asset_type: String,
    pub title: Option<String>,
    pub prompt: Option<String>,
    pub metadata: serde_json::Value,
}

/// A rendition row holding the encoded payload inline.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = asset_renditions)]
#[diesel(belongs_to(AssetRow, foreign_key = asset_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RenditionRow {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub mime_type: String,
    pub width: i32,
    pub height: i32,
    pub payload_base64: String,
    pub created_at: DateTime<Utc>,
}

/// New rendition row for insertion.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = asset_renditions)]
pub struct NewRenditionRow {
    pub asset_id: Uuid,
    pub mime_type: String,
    pub width: i32,
    pub height: i32,
    pub payload_base64: String,
}

impl TryFrom<JobRow> for JobRecord {
    type Error = DatabaseError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let size = row.size.parse().map_err(|e: String| {
            DatabaseError::new(DatabaseErrorKind::Query(format!("corrupt job row: {}", e)))
        })?;
        let status = row.status.parse().map_err(|e: String| {
            DatabaseError::new(DatabaseErrorKind::Query(format!("corrupt job row: {}", e)))
        })?;
        Ok(JobRecord {
            id: row.id,
            prompt_summary: row.prompt_summary,
            negative_prompt: row.negative_prompt,
            style_preset: row.style_preset,
            size,
            status,
            progress: row.progress,
            error_message: row.error_message,
            created_at: row.created_at,
            completed_at: row.completed_at,
        })
    }
}

impl From<AssetRow> for AssetRecord {
    fn from(row: AssetRow) -> Self {
        AssetRecord {
            id: row.id,
            job_id: row.job_id,
            asset_type: row.asset_type,
            title: row.title,
            prompt: row.prompt,
            metadata: row.metadata,
            created_at: row.created_at,
        }
    }
}

impl From<RenditionRow> for RenditionRecord {
    fn from(row: RenditionRow) -> Self {
        RenditionRecord {
            id: row.id,
            asset_id: row.asset_id,
            mime_type: row.mime_type,
            width: row.width,
            height: row.height,
            payload_base64: row.payload_base64,
            created_at: row.created_at,
        }
    }
}
