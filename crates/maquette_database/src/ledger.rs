//! PostgreSQL implementation of the generation ledger.

use crate::models::{AssetRow, JobRow, NewAssetRow, NewJobRow, NewRenditionRow, RenditionRow};
use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use maquette_core::{
    AssetRecord, GenerationLedger, JobRecord, JobStatus, NewAsset, NewJob, NewRendition,
    RenditionRecord, metadata,
};
use maquette_error::{DatabaseError, DatabaseErrorKind, MaquetteResult};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

fn query_error(e: diesel::result::Error) -> DatabaseError {
    DatabaseError::new(DatabaseErrorKind::Query(e.to_string()))
}

/// Generation ledger backed by PostgreSQL through Diesel.
///
/// The connection is wrapped in `Arc<Mutex>` for async access. For concurrent
/// pipeline runs, consider a connection pool; runs only ever read committed
/// rows, so no cross-run coordination happens here.
pub struct PostgresLedger {
    conn: Arc<Mutex<PgConnection>>,
}

impl PostgresLedger {
    /// Create a ledger owning the given connection.
    ///
    /// # Example
    /// ```no_run
    /// use maquette_database::{PostgresLedger, establish_connection};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let conn = establish_connection()?;
    /// let ledger = PostgresLedger::new(conn);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(conn: PgConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Create a ledger from a shared connection.
    pub fn from_arc(conn: Arc<Mutex<PgConnection>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl GenerationLedger for PostgresLedger {
    async fn create_job(&self, new_job: NewJob) -> MaquetteResult<JobRecord> {
        use crate::schema::generation_jobs;

        let row = NewJobRow {
            prompt_summary: new_job.prompt_summary,
            negative_prompt: new_job.negative_prompt,
            style_preset: new_job.style_preset.map(|s| s.as_str().to_string()),
            size: new_job.size.as_str().to_string(),
            status: JobStatus::Queued.as_str().to_string(),
            progress: 0,
        };

        let mut conn = self.conn.lock().await;
        let inserted: JobRow = diesel::insert_into(generation_jobs::table)
            .values(&row)
            .get_result(&mut *conn)
            .map_err(query_error)?;
        debug!(job_id = %inserted.id, "Created generation job");
        Ok(inserted.try_into()?)
    }

    async fn mark_job_running(&self, job_id: Uuid) -> MaquetteResult<()> {
        use crate::schema::generation_jobs::dsl;

        let mut conn = self.conn.lock().await;
        diesel::update(dsl::generation_jobs.filter(dsl::id.eq(job_id)))
            .set(dsl::status.eq(JobStatus::Running.as_str()))
            .execute(&mut *conn)
            .map_err(query_error)?;
        Ok(())
    }

    async fn update_job_progress(&self, job_id: Uuid, progress: i32) -> MaquetteResult<()> {
        use crate::schema::generation_jobs::dsl;

        let mut conn = self.conn.lock().await;
        diesel::update(dsl::generation_jobs.filter(dsl::id.eq(job_id)))
            .set(dsl::progress.eq(progress))
            .execute(&mut *conn)
            .map_err(query_error)?;
        Ok(())
    }

    async fn complete_job(&self, job_id: Uuid) -> MaquetteResult<JobRecord> {
        use crate::schema::generation_jobs::dsl;

        let mut conn = self.conn.lock().await;
        let updated: Option<JobRow> =
            diesel::update(dsl::generation_jobs.filter(dsl::id.eq(job_id)))
                .set((
                    dsl::status.eq(JobStatus::Succeeded.as_str()),
                    dsl::progress.eq(100),
                    dsl::completed_at.eq(Some(Utc::now())),
                ))
                .get_result(&mut *conn)
                .optional()
                .map_err(query_error)?;
        let row = updated.ok_or_else(|| {
            DatabaseError::new(DatabaseErrorKind::NotFound(format!("job {}", job_id)))
        })?;
        Ok(row.try_into()?)
    }

    async fn fail_job(&self, job_id: Uuid, error_message: &str) -> MaquetteResult<JobRecord> {
        use crate::schema::generation_jobs::dsl;

        let mut conn = self.conn.lock().await;
        let updated: Option<JobRow> =
            diesel::update(dsl::generation_jobs.filter(dsl::id.eq(job_id)))
                .set((
                    dsl::status.eq(JobStatus::Failed.as_str()),
                    dsl::error_message.eq(Some(error_message)),
                    dsl::completed_at.eq(Some(Utc::now())),
                ))
                .get_result(&mut *conn)
                .optional()
                .map_err(query_error)?;
        let row = updated.ok_or_else(|| {
            DatabaseError::new(DatabaseErrorKind::NotFound(format!("job {}", job_id)))
        })?;
        Ok(row.try_into()?)
    }

    async fn create_asset(&self, new_asset: NewAsset) -> MaquetteResult<AssetRecord> {
        use crate::schema::assets;

        let row = NewAssetRow {
            job_id: new_asset.job_id,
            asset_type: "image".to_string(),
            title: new_asset.title,
            prompt: new_asset.prompt,
            metadata: new_asset.metadata,
        };

        let mut conn = self.conn.lock().await;
        let inserted: AssetRow = diesel::insert_into(assets::table)
            .values(&row)
            .get_result(&mut *conn)
            .map_err(query_error)?;
        Ok(inserted.into())
    }

    async fn create_rendition(
        &self,
        new_rendition: NewRendition,
    ) -> MaquetteResult<RenditionRecord> {
        use crate::schema::asset_renditions;

        let row = NewRenditionRow {
            asset_id: new_rendition.asset_id,
            mime_type: new_rendition.mime_type,
            width: new_rendition.width,
            height: new_rendition.height,
            payload_base64: new_rendition.payload_base64,
        };

        let mut conn = self.conn.lock().await;
        let inserted: RenditionRow = diesel::insert_into(asset_renditions::table)
            .values(&row)
            .get_result(&mut *conn)
            .map_err(query_error)?;
        Ok(inserted.into())
    }

    async fn list_reference_assets(
        &self,
        project_name: &str,
        asset_ids: Option<&[Uuid]>,
        cap: usize,
    ) -> MaquetteResult<Vec<AssetRecord>> {
        use crate::schema::assets::dsl;

        let mut conn = self.conn.lock().await;
        let mut query = dsl::assets.into_boxed();

        match asset_ids {
            Some(ids) if !ids.is_empty() => {
                query = query.filter(dsl::id.eq_any(ids.to_vec()));
            }
            _ => {
                let project_tag = serde_json::json!({ metadata::PROJECT: project_name });
                query = query
                    .filter(dsl::metadata.contains(project_tag))
                    .filter(dsl::metadata.has_key(metadata::CATEGORY));
            }
        }

        let rows: Vec<AssetRow> = query
            .order(dsl::created_at.desc())
            .limit(cap as i64)
            .load(&mut *conn)
            .map_err(query_error)?;
        debug!(project = %project_name, count = rows.len(), "Listed reference assets");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn latest_rendition(&self, asset_id: Uuid) -> MaquetteResult<Option<RenditionRecord>> {
        use crate::schema::asset_renditions::dsl;

        let mut conn = self.conn.lock().await;
        let row: Option<RenditionRow> = dsl::asset_renditions
            .filter(dsl::asset_id.eq(asset_id))
            .order(dsl::created_at.desc())
            .first(&mut *conn)
            .optional()
            .map_err(query_error)?;
        Ok(row.map(Into::into))
    }
}
