//! In-memory generation ledger for tests and dry runs.

use async_trait::async_trait;
use chrono::Utc;
use maquette_core::{
    AssetRecord, GenerationLedger, JobRecord, JobStatus, NewAsset, NewJob, NewRendition,
    RenditionRecord, metadata,
};
use maquette_error::{MaquetteResult, PipelineError, PipelineErrorKind};
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Default)]
struct LedgerState {
    jobs: Vec<JobRecord>,
    assets: Vec<AssetRecord>,
    renditions: Vec<RenditionRecord>,
    progress_log: HashMap<Uuid, Vec<i32>>,
}

/// Generation ledger held entirely in memory.
///
/// Rows are stored in insertion order; "latest" and "newest first" follow
/// creation order exactly like the timestamp ordering of the PostgreSQL
/// implementation. The ledger additionally records every progress value
/// written to a job, which the tests use to observe progress monotonicity.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a job by id.
    pub async fn job(&self, job_id: Uuid) -> Option<JobRecord> {
        let state = self.state.lock().await;
        state.jobs.iter().find(|job| job.id == job_id).cloned()
    }

    /// Progress values written to a job, in write order.
    pub async fn progress_history(&self, job_id: Uuid) -> Vec<i32> {
        let state = self.state.lock().await;
        state.progress_log.get(&job_id).cloned().unwrap_or_default()
    }

    /// Number of job rows.
    pub async fn job_count(&self) -> usize {
        self.state.lock().await.jobs.len()
    }

    /// Number of asset rows.
    pub async fn asset_count(&self) -> usize {
        self.state.lock().await.assets.len()
    }

    /// Number of rendition rows.
    pub async fn rendition_count(&self) -> usize {
        self.state.lock().await.renditions.len()
    }

    /// Snapshot of all asset rows in insertion order.
    pub async fn assets(&self) -> Vec<AssetRecord> {
        self.state.lock().await.assets.clone()
    }

    /// Snapshot of all job rows in insertion order.
    pub async fn jobs_snapshot(&self) -> Vec<JobRecord> {
        self.state.lock().await.jobs.clone()
    }
}

fn unknown_job(job_id: Uuid) -> PipelineError {
    PipelineError::new(PipelineErrorKind::Ledger(format!("unknown job {}", job_id)))
}

#[async_trait]
impl GenerationLedger for InMemoryLedger {
    async fn create_job(&self, new_job: NewJob) -> MaquetteResult<JobRecord> {
        let job = JobRecord {
            id: Uuid::new_v4(),
            prompt_summary: new_job.prompt_summary,
            negative_prompt: new_job.negative_prompt,
            style_preset: new_job.style_preset.map(|s| s.as_str().to_string()),
            size: new_job.size,
            status: JobStatus::Queued,
            progress: 0,
            error_message: None,
            created_at: Utc::now(),
            completed_at: None,
        };
        let mut state = self.state.lock().await;
        state.jobs.push(job.clone());
        Ok(job)
    }

    async fn mark_job_running(&self, job_id: Uuid) -> MaquetteResult<()> {
        let mut state = self.state.lock().await;
        let job = state
            .jobs
            .iter_mut()
            .find(|job| job.id == job_id)
            .ok_or_else(|| unknown_job(job_id))?;
        job.status = JobStatus::Running;
        Ok(())
    }

    async fn update_job_progress(&self, job_id: Uuid, progress: i32) -> MaquetteResult<()> {
        let mut state = self.state.lock().await;
        let job = state
            .jobs
            .iter_mut()
            .find(|job| job.id == job_id)
            .ok_or_else(|| unknown_job(job_id))?;
        job.progress = progress;
        state.progress_log.entry(job_id).or_default().push(progress);
        Ok(())
    }

    async fn complete_job(&self, job_id: Uuid) -> MaquetteResult<JobRecord> {
        let mut state = self.state.lock().await;
        let job = state
            .jobs
            .iter_mut()
            .find(|job| job.id == job_id)
            .ok_or_else(|| unknown_job(job_id))?;
        job.status = JobStatus::Succeeded;
        job.progress = 100;
        job.completed_at = Some(Utc::now());
        Ok(job.clone())
    }

    async fn fail_job(&self, job_id: Uuid, error_message: &str) -> MaquetteResult<JobRecord> {
        let mut state = self.state.lock().await;
        let job = state
            .jobs
            .iter_mut()
            .find(|job| job.id == job_id)
            .ok_or_else(|| unknown_job(job_id))?;
        job.status = JobStatus::Failed;
        job.error_message = Some(error_message.to_string());
        job.completed_at = Some(Utc::now());
        Ok(job.clone())
    }

    async fn create_asset(&self, new_asset: NewAsset) -> MaquetteResult<AssetRecord> {
        let asset = AssetRecord {
            id: Uuid::new_v4(),
            job_id: new_asset.job_id,
            asset_type: "image".to_string(),
            title: new_asset.title,
            prompt: new_asset.prompt,
            metadata: new_asset.metadata,
            created_at: Utc::now(),
        };
        let mut state = self.state.lock().await;
        state.assets.push(asset.clone());
        Ok(asset)
    }

    async fn create_rendition(
        &self,
        new_rendition: NewRendition,
    ) -> MaquetteResult<RenditionRecord> {
        let rendition = RenditionRecord {
            id: Uuid::new_v4(),
            asset_id: new_rendition.asset_id,
            mime_type: new_rendition.mime_type,
            width: new_rendition.width,
            height: new_rendition.height,
            payload_base64: new_rendition.payload_base64,
            created_at: Utc::now(),
        };
        let mut state = self.state.lock().await;
        state.renditions.push(rendition.clone());
        Ok(rendition)
    }

    async fn list_reference_assets(
        &self,
        project_name: &str,
        asset_ids: Option<&[Uuid]>,
        cap: usize,
    ) -> MaquetteResult<Vec<AssetRecord>> {
        let state = self.state.lock().await;
        let selected: Vec<AssetRecord> = match asset_ids {
            Some(ids) if !ids.is_empty() => state
                .assets
                .iter()
                .rev()
                .filter(|asset| ids.contains(&asset.id))
                .take(cap)
                .cloned()
                .collect(),
            _ => state
                .assets
                .iter()
                .rev()
                .filter(|asset| {
                    asset.metadata.get(metadata::CATEGORY).is_some()
                        && asset
                            .metadata
                            .get(metadata::PROJECT)
                            .and_then(|v| v.as_str())
                            == Some(project_name)
                })
                .take(cap)
                .cloned()
                .collect(),
        };
        Ok(selected)
    }

    async fn latest_rendition(&self, asset_id: Uuid) -> MaquetteResult<Option<RenditionRecord>> {
        let state = self.state.lock().await;
        Ok(state
            .renditions
            .iter()
            .rev()
            .find(|rendition| rendition.asset_id == asset_id)
            .cloned())
    }
}
