//! The persistence contract the orchestration pipeline writes through.
//!
//! The ledger records job lifecycle, assets, and renditions. Implementations
//! live elsewhere (PostgreSQL in `maquette_database`, in-memory for tests);
//! the trait is defined here so neither side depends on the other.

use crate::{ImageSize, JobStatus, StylePreset};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use maquette_error::MaquetteResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Keys used in the free-form asset metadata map.
pub mod metadata {
    /// Project the asset belongs to.
    pub const PROJECT: &str = "project";
    /// Asset category tag (`character`, `environment`, `nature`).
    pub const CATEGORY: &str = "category";
    /// Which flow produced the asset (`single`, `project_pack`, `storyboard`).
    pub const PROVENANCE: &str = "provenance";
    /// 1-based scene index for storyboard frames.
    pub const SCENE_INDEX: &str = "scene_index";
    /// Derived scene title for storyboard frames.
    pub const SCENE_TITLE: &str = "scene_title";
}

/// Fields for a new generation job row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJob {
    /// Short text summarizing what the job generates
    pub prompt_summary: String,
    /// Optional negative prompt carried by the request
    pub negative_prompt: Option<String>,
    /// Optional style preset carried by the request
    pub style_preset: Option<StylePreset>,
    /// Target output size
    pub size: ImageSize,
}

/// A generation job row as read back from the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Job id
    pub id: Uuid,
    /// Short text summarizing what the job generates
    pub prompt_summary: String,
    /// Optional negative prompt
    pub negative_prompt: Option<String>,
    /// Optional style preset label
    pub style_preset: Option<String>,
    /// Target output size
    pub size: ImageSize,
    /// Current lifecycle state
    pub status: JobStatus,
    /// Completion percentage, 0 to 100, monotonically non-decreasing
    pub progress: i32,
    /// Error message recorded on failure
    pub error_message: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Terminal transition timestamp
    pub completed_at: Option<DateTime<Utc>>,
}

/// Fields for a new asset row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAsset {
    /// Owning job, when the asset was produced by a tracked run
    pub job_id: Option<Uuid>,
    /// Optional display title
    pub title: Option<String>,
    /// Prompt text the asset was generated from
    pub prompt: Option<String>,
    /// Free-form metadata map (see [`metadata`] for well-known keys)
    pub metadata: serde_json::Value,
}

/// An asset row as read back from the ledger. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Asset id
    pub id: Uuid,
    /// Owning job
    pub job_id: Option<Uuid>,
    /// Artifact type, fixed to `image` in the current scope
    pub asset_type: String,
    /// Optional display title
    pub title: Option<String>,
    /// Prompt text the asset was generated from
    pub prompt: Option<String>,
    /// Free-form metadata map
    pub metadata: serde_json::Value,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Fields for a new rendition row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRendition {
    /// Asset the payload belongs to
    pub asset_id: Uuid,
    /// Payload MIME type
    pub mime_type: String,
    /// Pixel width
    pub width: i32,
    /// Pixel height
    pub height: i32,
    /// Base64-encoded image bytes, stored inline
    pub payload_base64: String,
}

/// A rendition row as read back from the ledger.
///
/// The latest rendition for an asset is the most recently created row for
/// that asset id; there is no explicit pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenditionRecord {
    /// Rendition id
    pub id: Uuid,
    /// Asset the payload belongs to
    pub asset_id: Uuid,
    /// Payload MIME type
    pub mime_type: String,
    /// Pixel width
    pub width: i32,
    /// Pixel height
    pub height: i32,
    /// Base64-encoded image bytes
    pub payload_base64: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Persistence operations the orchestration pipeline depends on.
///
/// All consistency is delegated to the implementation's write semantics; the
/// pipeline holds no locks of its own and only ever reads committed rows.
#[async_trait]
pub trait GenerationLedger: Send + Sync {
    /// Create a job in `queued` state with zero progress.
    async fn create_job(&self, new_job: NewJob) -> MaquetteResult<JobRecord>;

    /// Transition a job to `running`.
    async fn mark_job_running(&self, job_id: Uuid) -> MaquetteResult<()>;

    /// Record progress after a unit of generation work.
    async fn update_job_progress(&self, job_id: Uuid, progress: i32) -> MaquetteResult<()>;

    /// Terminal transition to `succeeded` with progress 100.
    async fn complete_job(&self, job_id: Uuid) -> MaquetteResult<JobRecord>;

    /// Terminal transition to `failed` with the captured error message.
    async fn fail_job(&self, job_id: Uuid, error_message: &str) -> MaquetteResult<JobRecord>;

    /// Append an asset row.
    async fn create_asset(&self, new_asset: NewAsset) -> MaquetteResult<AssetRecord>;

    /// Append a rendition row for an existing asset.
    async fn create_rendition(&self, new_rendition: NewRendition)
    -> MaquetteResult<RenditionRecord>;

    /// List previously committed project assets usable as reference context.
    ///
    /// When `asset_ids` is given the listing is restricted to those ids;
    /// otherwise it returns category-tagged assets for the project. Results
    /// are newest first, capped at `cap`.
    async fn list_reference_assets(
        &self,
        project_name: &str,
        asset_ids: Option<&[Uuid]>,
        cap: usize,
    ) -> MaquetteResult<Vec<AssetRecord>>;

    /// The most recently created rendition for an asset, if any.
    async fn latest_rendition(&self, asset_id: Uuid) -> MaquetteResult<Option<RenditionRecord>>;
}
