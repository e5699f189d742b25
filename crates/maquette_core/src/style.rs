//! Style presets applied during prompt assembly.

use serde::{Deserialize, Serialize};

/// Closed set of style labels a request may carry.
///
/// Each preset maps to a fixed descriptive phrase appended to the prompt's
/// style line. Requests without a preset fall back to the assembler's default
/// style phrase.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum StylePreset {
    /// Filmic lighting and color grade
    #[display("cinematic")]
    Cinematic,
    /// Loose washes over paper texture
    #[display("watercolor")]
    Watercolor,
    /// Key-visual linework with cel shading
    #[display("anime")]
    Anime,
    /// Bold inks with halftone shading
    #[display("comic")]
    Comic,
    /// Photographic rendering
    #[display("photoreal")]
    Photoreal,
    /// Painterly development art
    #[display("concept-art")]
    ConceptArt,
}

impl StylePreset {
    /// Convert to the label stored on job rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            StylePreset::Cinematic => "cinematic",
            StylePreset::Watercolor => "watercolor",
            StylePreset::Anime => "anime",
            StylePreset::Comic => "comic",
            StylePreset::Photoreal => "photoreal",
            StylePreset::ConceptArt => "concept-art",
        }
    }

    /// The descriptive phrase injected into the prompt's style line.
    pub fn phrase(&self) -> &'static str {
        match self {
            StylePreset::Cinematic => "cinematic lighting, filmic color grade",
            StylePreset::Watercolor => "loose watercolor washes, soft paper texture",
            StylePreset::Anime => "anime key visual, clean linework, cel shading",
            StylePreset::Comic => "bold comic inks, halftone shading",
            StylePreset::Photoreal => "photorealistic rendering, natural light",
            StylePreset::ConceptArt => "painterly concept art, confident brushwork",
        }
    }
}

impl std::str::FromStr for StylePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cinematic" => Ok(StylePreset::Cinematic),
            "watercolor" => Ok(StylePreset::Watercolor),
            "anime" => Ok(StylePreset::Anime),
            "comic" => Ok(StylePreset::Comic),
            "photoreal" => Ok(StylePreset::Photoreal),
            "concept-art" => Ok(StylePreset::ConceptArt),
            _ => Err(format!("Unknown style preset: {}", s)),
        }
    }
}
