//! Deterministic prompt assembly.
//!
//! The generation backends are prompt-order-sensitive, so line ordering here
//! is fixed and significant: context header, subject, guidance lines,
//! reference summary, style, and (for storyboard frames) the trailing
//! continuity instruction. Assembly is a pure function of its inputs; the
//! same descriptor and context always produce the same bytes.

use crate::{AssetDescriptor, SceneDescriptor};
use maquette_core::{AssetCategory, StylePreset};

/// Style phrase used when a request carries no preset.
pub const DEFAULT_STYLE_PHRASE: &str = "cohesive illustrated concept art, balanced palette";

/// Trailing instruction shared verbatim by every storyboard frame.
pub const CONTINUITY_LINE: &str =
    "Keep continuity with prior frames: same characters, same palette, same rendering style.";

/// Contextual directives shared by every prompt in one pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptContext {
    /// Project header line, when the flow is project-scoped
    pub project_name: Option<String>,
    /// Style preset from the request
    pub style: Option<StylePreset>,
    /// Summary of previously generated reference assets
    pub reference_summary: Option<String>,
}

/// Assemble the prompt for one storyboard frame.
pub fn scene_prompt(scene: &SceneDescriptor, ctx: &PromptContext) -> String {
    let mut lines = Vec::new();
    if let Some(project) = &ctx.project_name {
        lines.push(format!("Project: {}", project));
    }
    lines.push(format!("Scene {}: {}", scene.index(), scene.title()));
    lines.push(format!("Subject: {}", scene.summary()));
    lines.push(format!("Composition: {}", scene.composition()));
    lines.push(format!("Environment and weather: {}", scene.nature()));
    lines.push(format!(
        "Character consistency: {}",
        scene.character_consistency()
    ));
    if let Some(reference) = &ctx.reference_summary {
        lines.push(format!("Reference assets: {}", reference));
    }
    lines.push(style_line(ctx.style));
    lines.push(CONTINUITY_LINE.to_string());
    lines.join("\n")
}

/// Assemble the prompt for one project pack asset.
///
/// There is no cross-category continuity: consistency within a pack comes
/// from the shared project header and style line alone.
pub fn asset_prompt(descriptor: &AssetDescriptor, ctx: &PromptContext) -> String {
    let subject = match descriptor.category() {
        AssetCategory::Character => format!(
            "Character design sheet of {}, full body, neutral pose, expression clarity",
            descriptor.descriptor()
        ),
        AssetCategory::Environment => format!(
            "Environment concept frame of {}, wide framing, layout readability",
            descriptor.descriptor()
        ),
        AssetCategory::Nature => format!(
            "Nature mood plate of {}, weather, foliage, terrain",
            descriptor.descriptor()
        ),
    };

    let mut lines = Vec::new();
    if let Some(project) = &ctx.project_name {
        lines.push(format!("Project: {}", project));
    }
    lines.push(subject);
    lines.push(style_line(ctx.style));
    lines.join("\n")
}

/// Assemble the prompt for a single-image request: the original prompt with
/// optional avoidance and style lines appended.
pub fn single_prompt(
    prompt: &str,
    negative_prompt: Option<&str>,
    style: Option<StylePreset>,
) -> String {
    let mut lines = vec![prompt.trim().to_string()];
    if let Some(negative) = negative_prompt {
        let negative = negative.trim();
        if !negative.is_empty() {
            lines.push(format!("Avoid: {}", negative));
        }
    }
    if let Some(style) = style {
        lines.push(format!("Style: {}", style.phrase()));
    }
    lines.join("\n")
}

fn style_line(style: Option<StylePreset>) -> String {
    format!(
        "Style: {}",
        style.map(|s| s.phrase()).unwrap_or(DEFAULT_STYLE_PHRASE)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SceneNotes, build_scene_descriptors};

    fn scene() -> SceneDescriptor {
        let script = "MARA waits in the rain by the tower.\n\n\
            The market floods before dawn breaks over the city.";
        build_scene_descriptors(script, 2, &SceneNotes::default())
            .into_iter()
            .next()
            .unwrap()
    }

    #[test]
    fn assembly_is_idempotent() {
        let ctx = PromptContext {
            project_name: Some("Drowned Bells".to_string()),
            style: Some(StylePreset::Watercolor),
            reference_summary: Some("Mara design sheet".to_string()),
        };
        let scene = scene();
        assert_eq!(scene_prompt(&scene, &ctx), scene_prompt(&scene, &ctx));
    }

    #[test]
    fn scene_prompt_line_order_is_fixed() {
        let ctx = PromptContext {
            project_name: Some("Drowned Bells".to_string()),
            style: None,
            reference_summary: Some("Mara design sheet".to_string()),
        };
        let prompt = scene_prompt(&scene(), &ctx);
        let lines: Vec<&str> = prompt.lines().collect();
        assert!(lines[0].starts_with("Project:"));
        assert!(lines[1].starts_with("Scene 1:"));
        assert!(lines[2].starts_with("Subject:"));
        assert!(lines[3].starts_with("Composition:"));
        assert!(lines[4].starts_with("Environment and weather:"));
        assert!(lines[5].starts_with("Character consistency:"));
        assert!(lines[6].starts_with("Reference assets:"));
        assert!(lines[7].starts_with("Style:"));
        assert_eq!(lines[8], CONTINUITY_LINE);
    }

    #[test]
    fn style_line_falls_back_to_default_phrase() {
        let prompt = scene_prompt(&scene(), &PromptContext::default());
        assert!(prompt.contains(DEFAULT_STYLE_PHRASE));
    }

    #[test]
    fn asset_prompt_uses_category_templates() {
        let ctx = PromptContext::default();
        let character = asset_prompt(
            &AssetDescriptor::new(maquette_core::AssetCategory::Character, "Mara"),
            &ctx,
        );
        assert!(character.starts_with("Character design sheet of Mara"));

        let nature = asset_prompt(
            &AssetDescriptor::new(maquette_core::AssetCategory::Nature, "storm over the bay"),
            &ctx,
        );
        assert!(nature.starts_with("Nature mood plate of storm over the bay"));
    }

    #[test]
    fn single_prompt_appends_optional_lines_in_order() {
        let prompt = single_prompt("a red cube", Some("text, warped geometry"), Some(StylePreset::Comic));
        let lines: Vec<&str> = prompt.lines().collect();
        assert_eq!(lines[0], "a red cube");
        assert_eq!(lines[1], "Avoid: text, warped geometry");
        assert!(lines[2].starts_with("Style:"));
    }

    #[test]
    fn single_prompt_without_extras_is_just_the_prompt() {
        assert_eq!(single_prompt("a red cube", None, None), "a red cube");
    }
}
