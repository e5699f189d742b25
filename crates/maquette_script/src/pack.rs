//! Descriptors for project asset packs.

use crate::{
    character_candidates, environment_candidates, fallback_descriptor, nature_candidates,
};
use maquette_core::AssetCategory;
use serde::{Deserialize, Serialize};

/// One planned reference asset in a project pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct AssetDescriptor {
    /// Which reference category the asset belongs to
    category: AssetCategory,
    /// Free-text subject pulled from the script (or the fallback prefix)
    descriptor: String,
}

impl AssetDescriptor {
    /// Create a descriptor.
    pub fn new(category: AssetCategory, descriptor: impl Into<String>) -> Self {
        Self {
            category,
            descriptor: descriptor.into(),
        }
    }
}

/// Extract up to `count` descriptors for one category.
///
/// Extraction can legitimately come up empty (no capitalized names, no
/// substantial lines); the truncated script prefix then stands in so the
/// category still produces one asset.
pub fn pack_descriptors(
    script: &str,
    category: AssetCategory,
    count: usize,
) -> Vec<AssetDescriptor> {
    let raw = match category {
        AssetCategory::Character => character_candidates(script, count),
        AssetCategory::Environment => environment_candidates(script, count),
        AssetCategory::Nature => nature_candidates(script, count),
    };

    if raw.is_empty() {
        return vec![AssetDescriptor::new(category, fallback_descriptor(script))];
    }

    raw.into_iter()
        .map(|descriptor| AssetDescriptor::new(category, descriptor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_extracted_names_for_characters() {
        let descriptors =
            pack_descriptors("Mara argues with Joren at the gate.", AssetCategory::Character, 2);
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].descriptor(), "Mara");
    }

    #[test]
    fn falls_back_to_script_prefix_when_extraction_is_empty() {
        let script = "a quiet tale\ntold in short\nlowercase lines\nwith no names";
        let descriptors = pack_descriptors(script, AssetCategory::Environment, 3);
        assert_eq!(descriptors.len(), 1);
        assert!(descriptors[0].descriptor().starts_with("a quiet tale"));
    }
}
