//! Orchestration pipeline for the Maquette generation flows.
//!
//! Three entry flows share one frame: validate the request, create a job in
//! `queued`, move it to `running`, generate one image per unit of work,
//! persist an asset and rendition after each successful image, update
//! progress, and end the job in a terminal state. Any failure after the job
//! row exists marks the job `failed` with the captured error before the error
//! propagates, so no flow leaves a job stuck in `running`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod memory;
mod outcome;
mod pipeline;

pub use memory::InMemoryLedger;
pub use outcome::{
    GeneratedAsset, ProjectPackOutcome, SceneFrame, SingleImageOutcome, StoryboardOutcome,
};
pub use pipeline::{GenerationPipeline, REFERENCE_ASSET_CAP};
