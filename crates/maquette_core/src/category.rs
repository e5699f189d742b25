//! Reference asset categories for project packs.

use serde::{Deserialize, Serialize};

/// Category of a project reference asset.
///
/// The project pack flow iterates categories in declaration order, which is
/// why the variants are listed character, environment, nature.
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
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    /// Character reference sheets
    #[display("character")]
    Character,
    /// Environment concept frames
    #[display("environment")]
    Environment,
    /// Nature and weather mood plates
    #[display("nature")]
    Nature,
}

impl AssetCategory {
    /// Convert to string representation for metadata tagging.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Character => "character",
            AssetCategory::Environment => "environment",
            AssetCategory::Nature => "nature",
        }
    }
}

impl std::str::FromStr for AssetCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "character" => Ok(AssetCategory::Character),
            "environment" => Ok(AssetCategory::Environment),
            "nature" => Ok(AssetCategory::Nature),
            _ => Err(format!("Unknown asset category: {}", s)),
        }
    }
}
