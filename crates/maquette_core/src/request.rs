//! Validated request types for the three generation flows.
//!
//! Validation runs at the request boundary, before any job row is created, so
//! a rejected request never leaves partial state behind.

use crate::{ImageSize, StylePreset};
use maquette_error::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum script length in characters (after trimming).
pub const MIN_SCRIPT_LEN: usize = 20;
/// Minimum storyboard scene count.
pub const MIN_SCENES: usize = 2;
/// Maximum storyboard scene count.
pub const MAX_SCENES: usize = 8;
/// Minimum per-category asset count for project packs.
pub const MIN_CATEGORY_COUNT: usize = 1;
/// Maximum per-category asset count for project packs.
pub const MAX_CATEGORY_COUNT: usize = 6;
/// Maximum project name length in characters.
pub const MAX_PROJECT_NAME_LEN: usize = 120;

fn check_script(script: &str, field: &str) -> Result<(), ValidationError> {
    if script.trim().chars().count() < MIN_SCRIPT_LEN {
        return Err(ValidationError::for_field(
            format!("script must be at least {} characters", MIN_SCRIPT_LEN),
            field,
        ));
    }
    Ok(())
}

fn check_project_name(name: &str, field: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if len == 0 || len > MAX_PROJECT_NAME_LEN {
        return Err(ValidationError::for_field(
            format!("project name must be 1 to {} characters", MAX_PROJECT_NAME_LEN),
            field,
        ));
    }
    Ok(())
}

fn check_category_count(count: usize, field: &str) -> Result<(), ValidationError> {
    if !(MIN_CATEGORY_COUNT..=MAX_CATEGORY_COUNT).contains(&count) {
        return Err(ValidationError::for_field(
            format!(
                "{} must be between {} and {}",
                field, MIN_CATEGORY_COUNT, MAX_CATEGORY_COUNT
            ),
            field,
        ));
    }
    Ok(())
}

/// Request for a single generated image.
///
/// # Examples
///
/// ```
/// use maquette_core::{ImageSize, SingleImageRequest};
///
/// let request = SingleImageRequest::builder()
///     .prompt("a red cube")
///     .build()
///     .unwrap();
///
/// assert_eq!(*request.size(), ImageSize::Square1024);
/// assert!(request.validate().is_ok());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct SingleImageRequest {
    /// The user's prompt, persisted verbatim on the asset
    prompt: String,
    /// Optional negative prompt appended as an avoidance line
    #[builder(default, setter(into, strip_option))]
    negative_prompt: Option<String>,
    /// Optional style preset
    #[builder(default, setter(strip_option))]
    style: Option<StylePreset>,
    /// Output size bucket, defaulting to the largest
    #[builder(default)]
    size: ImageSize,
}

impl SingleImageRequest {
    /// Start building a request.
    pub fn builder() -> SingleImageRequestBuilder {
        SingleImageRequestBuilder::default()
    }

    /// Check field constraints.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prompt.trim().is_empty() {
            return Err(ValidationError::for_field("prompt must not be empty", "prompt"));
        }
        Ok(())
    }
}

/// Request for a batch of category-tagged project reference images.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct ProjectPackRequest {
    /// Project the assets belong to
    project_name: String,
    /// Source script the descriptors are extracted from
    script: String,
    /// How many character sheets to generate (1 to 6)
    character_count: usize,
    /// How many environment frames to generate (1 to 6)
    environment_count: usize,
    /// How many nature plates to generate (1 to 6)
    nature_count: usize,
    /// Optional style preset shared by every asset in the pack
    #[builder(default, setter(strip_option))]
    style: Option<StylePreset>,
    /// Output size bucket, defaulting to the largest
    #[builder(default)]
    size: ImageSize,
}

impl ProjectPackRequest {
    /// Start building a request.
    pub fn builder() -> ProjectPackRequestBuilder {
        ProjectPackRequestBuilder::default()
    }

    /// Check field constraints.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_project_name(&self.project_name, "project_name")?;
        check_script(&self.script, "script")?;
        check_category_count(self.character_count, "character_count")?;
        check_category_count(self.environment_count, "environment_count")?;
        check_category_count(self.nature_count, "nature_count")?;
        Ok(())
    }
}

/// Request for an ordered storyboard of scene frames.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct StoryboardRequest {
    /// Source script segmented into scenes
    script: String,
    /// How many scene frames to produce (2 to 8)
    scene_count: usize,
    /// Project the frames belong to
    project_name: String,
    /// Extra guidance folded into the character consistency directive
    #[builder(default, setter(into, strip_option))]
    character_notes: Option<String>,
    /// Extra guidance folded into the environment directive
    #[builder(default, setter(into, strip_option))]
    environment_notes: Option<String>,
    /// Extra guidance folded into the nature directive
    #[builder(default, setter(into, strip_option))]
    nature_notes: Option<String>,
    /// Restrict reference context to these previously generated assets
    #[builder(default, setter(into, strip_option))]
    reference_asset_ids: Option<Vec<Uuid>>,
    /// Optional style preset shared by every frame
    #[builder(default, setter(strip_option))]
    style: Option<StylePreset>,
    /// Output size bucket, defaulting to the largest
    #[builder(default)]
    size: ImageSize,
}

impl StoryboardRequest {
    /// Start building a request.
    pub fn builder() -> StoryboardRequestBuilder {
        StoryboardRequestBuilder::default()
    }

    /// Check field constraints.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_script(&self.script, "script")?;
        if !(MIN_SCENES..=MAX_SCENES).contains(&self.scene_count) {
            return Err(ValidationError::for_field(
                format!("scene_count must be between {} and {}", MIN_SCENES, MAX_SCENES),
                "scene_count",
            ));
        }
        check_project_name(&self.project_name, "project_name")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_image_rejects_blank_prompt() {
        let request = SingleImageRequest::builder()
            .prompt("   ")
            .build()
            .unwrap();
        let err = request.validate().unwrap_err();
        assert_eq!(err.field.as_deref(), Some("prompt"));
    }

    #[test]
    fn storyboard_bounds_scene_count() {
        for count in [1usize, 9] {
            let request = StoryboardRequest::builder()
                .script("A long enough script for validation purposes.")
                .scene_count(count)
                .project_name("demo")
                .build()
                .unwrap();
            let err = request.validate().unwrap_err();
            assert_eq!(err.field.as_deref(), Some("scene_count"));
        }
    }

    #[test]
    fn storyboard_rejects_short_script() {
        let request = StoryboardRequest::builder()
            .script("too short")
            .scene_count(3usize)
            .project_name("demo")
            .build()
            .unwrap();
        let err = request.validate().unwrap_err();
        assert_eq!(err.field.as_deref(), Some("script"));
    }

    #[test]
    fn project_pack_bounds_category_counts() {
        let request = ProjectPackRequest::builder()
            .project_name("demo")
            .script("A long enough script for validation purposes.")
            .character_count(0usize)
            .environment_count(2usize)
            .nature_count(2usize)
            .build()
            .unwrap();
        let err = request.validate().unwrap_err();
        assert_eq!(err.field.as_deref(), Some("character_count"));
    }

    #[test]
    fn project_pack_bounds_project_name() {
        let request = ProjectPackRequest::builder()
            .project_name("x".repeat(121))
            .script("A long enough script for validation purposes.")
            .character_count(1usize)
            .environment_count(1usize)
            .nature_count(1usize)
            .build()
            .unwrap();
        let err = request.validate().unwrap_err();
        assert_eq!(err.field.as_deref(), Some("project_name"));
    }
}
