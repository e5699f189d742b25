//! Heuristic extraction of names and keywords from raw script text.
//!
//! These are best-effort string heuristics for creative prompting, not NLP:
//! every function is total, returns at most the requested number of items,
//! and may return nothing. Callers supply a fallback descriptor when an
//! extractor comes up empty.

use regex::Regex;
use std::sync::LazyLock;

static TITLE_CASE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]{2,}\b").expect("valid title-case regex"));

static ALL_CAPS_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{3,}\b").expect("valid all-caps regex"));

/// Keywords that mark a line as describing an environment.
pub const ENVIRONMENT_KEYWORDS: &[&str] = &[
    "forest", "city", "village", "temple", "school", "room", "street", "castle", "river",
    "mountain", "beach", "market",
];

/// Keywords that mark a line as describing nature, weather, or mood.
pub const NATURE_KEYWORDS: &[&str] = &[
    "rain", "wind", "storm", "sunset", "dawn", "night", "tree", "leaf", "ocean", "mist", "snow",
    "cloud",
];

/// Lines shorter than this are skipped as candidates.
const SUBSTANTIAL_LINE_MIN: usize = 20;
/// Candidate lines considered before ranking.
const CANDIDATE_LINE_CAP: usize = 40;
/// All-caps speaker names are capped regardless of how many appear.
const SPEAKER_CAP: usize = 6;
/// Fallback descriptors truncate the script to this many characters.
const FALLBACK_DESCRIPTOR_LEN: usize = 120;

/// Title-case word tokens, deduplicated in first-seen order, at most `count`.
///
/// # Examples
///
/// ```
/// use maquette_script::character_candidates;
///
/// let names = character_candidates("Mara waves at Joren. Mara laughs.", 5);
/// assert_eq!(names, vec!["Mara", "Joren"]);
/// ```
pub fn character_candidates(script: &str, count: usize) -> Vec<String> {
    let mut names = Vec::new();
    for token in TITLE_CASE_WORD.find_iter(script) {
        let token = token.as_str();
        if !names.iter().any(|n| n == token) {
            names.push(token.to_string());
        }
    }
    names.truncate(count);
    names
}

/// Fully capitalized tokens (screenplay speaker style), deduplicated, capped
/// at six. Feeds the character continuity directive, not asset descriptors.
pub fn speaker_names(script: &str) -> Vec<String> {
    let mut names = Vec::new();
    for token in ALL_CAPS_WORD.find_iter(script) {
        let token = token.as_str();
        if !names.iter().any(|n| n == token) {
            names.push(token.to_string());
        }
    }
    names.truncate(SPEAKER_CAP);
    names
}

/// Script lines likely to describe environments, keyword matches first.
pub fn environment_candidates(script: &str, count: usize) -> Vec<String> {
    keyword_ranked_lines(script, ENVIRONMENT_KEYWORDS, count)
}

/// Script lines likely to describe nature and weather, keyword matches first.
pub fn nature_candidates(script: &str, count: usize) -> Vec<String> {
    keyword_ranked_lines(script, NATURE_KEYWORDS, count)
}

/// Nature keywords present in `text`, in keyword-set order.
pub fn matched_nature_keywords(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    NATURE_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| lower.contains(keyword))
        .collect()
}

/// Truncated script prefix used when an extractor returns nothing, so every
/// category still yields at least one asset.
pub fn fallback_descriptor(script: &str) -> String {
    truncate_chars(script.trim(), FALLBACK_DESCRIPTOR_LEN)
}

/// Truncate to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn keyword_ranked_lines(script: &str, keywords: &[&str], count: usize) -> Vec<String> {
    let candidates: Vec<&str> = script
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.chars().count() > SUBSTANTIAL_LINE_MIN)
        .take(CANDIDATE_LINE_CAP)
        .collect();

    let (mut ranked, rest): (Vec<&str>, Vec<&str>) = candidates.into_iter().partition(|line| {
        let lower = line.to_lowercase();
        keywords.iter().any(|keyword| lower.contains(keyword))
    });
    ranked.extend(rest);

    ranked.into_iter().take(count).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = "\
        Mara crosses the flooded market at dawn.\n\
        The old temple leans over the river bend.\n\
        wind tugs at every loose shutter in the village\n\
        Joren waits.\n\
        MARA\n\
        It always rains before the bells.\n";

    #[test]
    fn character_candidates_deduplicate_and_bound() {
        let names = character_candidates("Mara meets Joren. Joren nods at Mara and Tessa.", 2);
        assert_eq!(names, vec!["Mara", "Joren"]);
    }

    #[test]
    fn character_candidates_skip_short_and_lowercase_tokens() {
        let names = character_candidates("it was Jo who ran", 5);
        assert!(names.is_empty());
    }

    #[test]
    fn speaker_names_are_capped_at_six() {
        let script = "AAA BBB CCC DDD EEE FFF GGG HHH";
        assert_eq!(speaker_names(script).len(), 6);
    }

    #[test]
    fn environment_lines_rank_keyword_matches_first() {
        let lines = environment_candidates(SCRIPT, 3);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("market"));
        assert!(lines[1].contains("temple"));
        // The non-matching rain line trails the keyword hits.
        assert!(lines[2].contains("village") || lines[2].contains("rains"));
    }

    #[test]
    fn extracted_lines_exist_in_the_source() {
        for line in nature_candidates(SCRIPT, 4) {
            assert!(SCRIPT.contains(&line));
        }
    }

    #[test]
    fn short_lines_are_not_candidates() {
        let lines = environment_candidates("Joren waits.\nMara nods.", 4);
        assert!(lines.is_empty());
    }

    #[test]
    fn fallback_descriptor_truncates_on_char_boundary() {
        let script = "é".repeat(200);
        assert_eq!(fallback_descriptor(&script).chars().count(), 120);
    }

    #[test]
    fn matched_nature_keywords_are_case_insensitive() {
        assert_eq!(matched_nature_keywords("RAIN over the Ocean"), vec!["rain", "ocean"]);
    }
}
