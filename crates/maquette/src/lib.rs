//! Maquette - project-scoped creative asset generation.
//!
//! Maquette turns a script or prompt into persisted image assets: it derives
//! scene and asset descriptors from the text, assembles provider prompts with
//! continuity context, calls one of two interchangeable image generation
//! backends, and records jobs, assets, and renditions through a ledger.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use maquette::{
//!     GenerationPipeline, PostgresLedger, SingleImageRequest, establish_connection,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     maquette::init_console_telemetry()?;
//!
//!     let settings = maquette::settings_from_env()?;
//!     let driver = settings.build_driver()?;
//!     let ledger = Arc::new(PostgresLedger::new(establish_connection()?));
//!     let pipeline = GenerationPipeline::new(driver, ledger);
//!
//!     let request = SingleImageRequest::builder().prompt("a red cube").build()?;
//!     let outcome = pipeline.generate_single_image(&request).await?;
//!     println!("job {} finished: {}", outcome.job.id, outcome.job.status);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Maquette is organized as a workspace with focused crates:
//!
//! - `maquette_error` - Error types
//! - `maquette_core` - Core data types and the ledger contract
//! - `maquette_script` - Segmentation, extraction, prompt assembly
//! - `maquette_providers` - Image generation backend clients
//! - `maquette_database` - PostgreSQL ledger
//! - `maquette_pipeline` - The three orchestration flows
//!
//! This crate (`maquette`) re-exports everything for convenience.

#![forbid(unsafe_code)]

mod telemetry;

pub use telemetry::init_console_telemetry;

pub use maquette_core::{
    AssetCategory, AssetRecord, GenerationLedger, ImageSize, JobRecord, JobStatus, NewAsset,
    NewJob, NewRendition, ProjectPackRequest, RenditionRecord, SingleImageRequest, StylePreset,
    StoryboardRequest, metadata,
};
pub use maquette_database::{PostgresLedger, establish_connection};
pub use maquette_error::{
    ConfigError, DatabaseError, MaquetteError, MaquetteErrorKind, MaquetteResult, PipelineError,
    ProviderError, ValidationError,
};
pub use maquette_pipeline::{
    GeneratedAsset, GenerationPipeline, InMemoryLedger, ProjectPackOutcome, SceneFrame,
    SingleImageOutcome, StoryboardOutcome,
};
pub use maquette_providers::{
    BackendKind, Credential, GeneratedImage, ImageDriver, OpenAiImagesClient, ProviderSettings,
    VolcImageClient,
};
pub use maquette_script::{
    SceneDescriptor, SceneNotes, build_scene_descriptors, segment_script,
};

/// Load a local `.env` file if present, then resolve provider settings from
/// the environment. Call once at process start and thread the settings in.
pub fn settings_from_env() -> MaquetteResult<ProviderSettings> {
    dotenvy::dotenv().ok();
    ProviderSettings::from_env()
}
