//! Core data types for the Maquette asset generation pipeline.
//!
//! This crate provides the foundation data types shared across the Maquette
//! workspace: size buckets, job statuses, asset categories, style presets,
//! validated request types, and the ledger contract the orchestration
//! pipeline persists through.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod category;
mod ledger;
mod request;
mod size;
mod status;
mod style;

pub use category::AssetCategory;
pub use ledger::{
    AssetRecord, GenerationLedger, JobRecord, NewAsset, NewJob, NewRendition, RenditionRecord,
    metadata,
};
pub use request::{
    MAX_CATEGORY_COUNT, MAX_PROJECT_NAME_LEN, MAX_SCENES, MIN_CATEGORY_COUNT, MIN_SCENES,
    MIN_SCRIPT_LEN, ProjectPackRequest, ProjectPackRequestBuilder, SingleImageRequest,
    SingleImageRequestBuilder, StoryboardRequest, StoryboardRequestBuilder,
};
pub use size::ImageSize;
pub use status::JobStatus;
pub use style::StylePreset;
