//! Result shapes returned by the generation flows.

use maquette_core::{AssetRecord, JobRecord, RenditionRecord};
use maquette_script::SceneDescriptor;
use serde::{Deserialize, Serialize};

/// Result of a single-image run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleImageOutcome {
    /// The finished job
    pub job: JobRecord,
    /// The created asset
    pub asset: AssetRecord,
    /// The created rendition
    pub rendition: RenditionRecord,
}

/// One generated asset together with its rendition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedAsset {
    /// The created asset
    pub asset: AssetRecord,
    /// The created rendition
    pub rendition: RenditionRecord,
}

/// Result of a project pack run, grouped by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectPackOutcome {
    /// The finished job
    pub job: JobRecord,
    /// Character design sheets
    pub characters: Vec<GeneratedAsset>,
    /// Environment concept frames
    pub environments: Vec<GeneratedAsset>,
    /// Nature mood plates
    pub nature: Vec<GeneratedAsset>,
}

/// One storyboard frame: the scene descriptor plus its persisted artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFrame {
    /// The scene this frame renders
    pub scene: SceneDescriptor,
    /// The created asset
    pub asset: AssetRecord,
    /// The created rendition
    pub rendition: RenditionRecord,
}

/// Result of a storyboard run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryboardOutcome {
    /// The finished job
    pub job: JobRecord,
    /// Ordered frames, one per scene
    pub scenes: Vec<SceneFrame>,
}
