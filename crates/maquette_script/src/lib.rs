//! Script decomposition for the Maquette asset generation pipeline.
//!
//! Turns raw scripts into scene-sized chunks, pulls character and keyword
//! candidates out of the text with string heuristics, and assembles the final
//! prompts handed to the generation backends. Everything here is pure string
//! processing: deterministic, total, and side-effect free.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extract;
mod pack;
mod prompt;
mod scene;
mod segment;

pub use extract::{
    ENVIRONMENT_KEYWORDS, NATURE_KEYWORDS, character_candidates, environment_candidates,
    fallback_descriptor, matched_nature_keywords, nature_candidates, speaker_names,
    truncate_chars,
};
pub use pack::{AssetDescriptor, pack_descriptors};
pub use prompt::{
    CONTINUITY_LINE, DEFAULT_STYLE_PHRASE, PromptContext, asset_prompt, scene_prompt,
    single_prompt,
};
pub use scene::{SCENE_TITLE_MAX, SceneDescriptor, SceneNotes, build_scene_descriptors};
pub use segment::segment_script;
