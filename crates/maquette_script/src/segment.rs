//! Splits a script into an ordered sequence of scene-sized chunks.

use regex::Regex;
use std::sync::LazyLock;

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n[ \t]*\r?\n").expect("valid paragraph-break regex"));

/// Sentence fragments shorter than this are discarded as micro-scenes.
const MIN_FRAGMENT_LEN: usize = 20;

/// Split a script into `clamp(requested_count, 2, ..)` ordered, non-empty
/// chunks that cover the entire input without dropping content.
///
/// Paragraph breaks are the preferred unit boundary; a script without at
/// least two paragraphs falls back to sentence boundaries. Units are grouped
/// with proportional index boundaries, so every group holds at least one unit
/// even when there are fewer units than groups (the unit is then shared by
/// adjacent groups). The final list is truncated to the caller's original
/// `requested_count`.
///
/// Empty or whitespace-only input is the caller's problem: request
/// validation enforces a minimum script length before this is reached.
///
/// # Examples
///
/// ```
/// use maquette_script::segment_script;
///
/// let script = "The door creaks open.\n\nRain hammers the tin roof all night.";
/// let chunks = segment_script(script, 2);
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0], "The door creaks open.");
/// ```
pub fn segment_script(script: &str, requested_count: usize) -> Vec<String> {
    let paragraphs: Vec<&str> = BLANK_LINE
        .split(script)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut units: Vec<String> = if paragraphs.len() >= 2 {
        paragraphs.into_iter().map(str::to_string).collect()
    } else {
        split_sentences(script)
    };

    if units.is_empty() {
        let whole = script.trim();
        if whole.is_empty() {
            return Vec::new();
        }
        units.push(whole.to_string());
    }

    let n = units.len();
    let effective = requested_count.max(2);
    let mut chunks = Vec::with_capacity(effective);
    for i in 0..effective {
        let start = i * n / effective;
        let end = (((i + 1) * n / effective).max(start + 1)).min(n);
        let chunk = units[start..end].join(" ").trim().to_string();
        if !chunk.is_empty() {
            chunks.push(chunk);
        }
    }

    chunks.truncate(requested_count);
    chunks
}

/// Split on `.`, `!`, `?` followed by whitespace, dropping fragments shorter
/// than [`MIN_FRAGMENT_LEN`].
fn split_sentences(text: &str) -> Vec<String> {
    let mut units = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().is_none_or(|next| next.is_whitespace()) {
            push_fragment(&mut units, &current);
            current.clear();
        }
    }
    push_fragment(&mut units, &current);

    units
}

fn push_fragment(units: &mut Vec<String>, fragment: &str) {
    let fragment = fragment.trim();
    if fragment.chars().count() >= MIN_FRAGMENT_LEN {
        units.push(fragment.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOUR_PARAGRAPHS: &str = "The village wakes under a heavy fog.\n\n\
        Mara climbs the bell tower before dawn.\n\n\
        The river floods the lower market street.\n\n\
        Everyone gathers on the temple steps at night.";

    #[test]
    fn paragraphs_map_one_to_one_when_counts_match() {
        let chunks = segment_script(FOUR_PARAGRAPHS, 4);
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0], "The village wakes under a heavy fog.");
        assert_eq!(chunks[3], "Everyone gathers on the temple steps at night.");
    }

    #[test]
    fn covers_every_paragraph_exactly_once_in_order() {
        let chunks = segment_script(FOUR_PARAGRAPHS, 2);
        assert_eq!(chunks.len(), 2);
        let rejoined = chunks.join(" ");
        let expected = FOUR_PARAGRAPHS.replace("\n\n", " ");
        assert_eq!(rejoined, expected);
    }

    #[test]
    fn falls_back_to_sentences_for_single_paragraph() {
        let script = "The door creaks open slowly. Rain hammers the tin roof. No. \
            A shadow crosses the far wall of the room.";
        let chunks = segment_script(script, 3);
        assert_eq!(chunks.len(), 3);
        // The two-character fragment is dropped rather than becoming a scene.
        assert!(chunks.iter().all(|c| !c.contains("No.")));
    }

    #[test]
    fn short_script_still_yields_a_chunk_pair() {
        let chunks = segment_script("A lone red cube.", 2);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c == "A lone red cube."));
    }

    #[test]
    fn final_slice_respects_a_sub_minimum_request() {
        let chunks = segment_script(FOUR_PARAGRAPHS, 1);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(segment_script("   \n\n  ", 3).is_empty());
    }
}
