//! Scene descriptors derived from a segmented script.

use crate::{matched_nature_keywords, segment_script, speaker_names, truncate_chars};
use serde::{Deserialize, Serialize};

/// Derived scene titles are truncated to this many characters.
pub const SCENE_TITLE_MAX: usize = 64;

/// One segmented unit of a script plus its derived directives.
///
/// Not persisted as its own row; the storyboard flow folds these into the
/// frame prompt and into asset metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct SceneDescriptor {
    /// 1-based position in the storyboard
    index: usize,
    /// Derived heading, truncated to [`SCENE_TITLE_MAX`] characters
    title: String,
    /// The segmented script chunk
    summary: String,
    /// Directive keeping characters consistent across frames
    character_consistency: String,
    /// Framing directive for this scene's position in the sequence
    composition: String,
    /// Environment and weather directive
    nature: String,
}

/// Optional per-request guidance folded into the derived directives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneNotes {
    /// Appended to the character consistency directive
    pub character: Option<String>,
    /// Appended to the nature directive
    pub environment: Option<String>,
    /// Appended to the nature directive
    pub nature: Option<String>,
}

/// Segment `script` into `scene_count` scenes and derive directives for each.
///
/// The character consistency directive is shared by all scenes (it comes from
/// the whole script); composition and nature directives vary per scene.
#[tracing::instrument(skip(script, notes))]
pub fn build_scene_descriptors(
    script: &str,
    scene_count: usize,
    notes: &SceneNotes,
) -> Vec<SceneDescriptor> {
    let chunks = segment_script(script, scene_count);
    let total = chunks.len();
    let character_consistency = character_directive(script, notes);

    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let index = i + 1;
            SceneDescriptor {
                index,
                title: derive_title(&chunk, index),
                character_consistency: character_consistency.clone(),
                composition: composition_directive(index, total),
                nature: nature_directive(&chunk, notes),
                summary: chunk,
            }
        })
        .collect()
}

fn derive_title(chunk: &str, index: usize) -> String {
    match chunk.lines().next().map(str::trim) {
        Some(first) if !first.is_empty() => truncate_chars(first, SCENE_TITLE_MAX),
        _ => format!("Scene {}", index),
    }
}

fn character_directive(script: &str, notes: &SceneNotes) -> String {
    let speakers = speaker_names(script);
    let mut directive = if speakers.is_empty() {
        "Keep recurring characters visually consistent across every frame".to_string()
    } else {
        format!(
            "Keep {} visually consistent across every frame",
            speakers.join(", ")
        )
    };
    append_note(&mut directive, notes.character.as_deref());
    directive
}

fn composition_directive(index: usize, total: usize) -> String {
    if index == 1 {
        "Wide establishing shot, scene geography readable".to_string()
    } else if index == total {
        "Tighter closing framing, weight on the focal subject".to_string()
    } else {
        "Medium shot, clear focal hierarchy".to_string()
    }
}

fn nature_directive(chunk: &str, notes: &SceneNotes) -> String {
    let matched = matched_nature_keywords(chunk);
    let mut directive = if matched.is_empty() {
        "Atmosphere follows the scene's mood".to_string()
    } else {
        format!("Lean into the {} atmosphere", matched.join(", "))
    };
    append_note(&mut directive, notes.environment.as_deref());
    append_note(&mut directive, notes.nature.as_deref());
    directive
}

fn append_note(directive: &mut String, note: Option<&str>) {
    if let Some(note) = note {
        let note = note.trim();
        if !note.is_empty() {
            directive.push_str("; ");
            directive.push_str(note);
        }
    }
}
