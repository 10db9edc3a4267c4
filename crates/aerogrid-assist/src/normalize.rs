//! Query and pattern normalization.
//!
//! Both the incoming query and every knowledge pattern are reduced to a
//! canonical comparison form so that punctuation, casing, and filler words
//! do not cause spurious mismatches. Two forms exist: a strict form used for
//! direct containment checks, and a stop-word-agnostic form that tolerates
//! rephrasing ("why is the air quality poor" vs "why is air quality poor").

use std::sync::LazyLock;

use regex::Regex;

/// Function words deleted (as whole words) by the stop-word-agnostic form:
/// articles, copulas, and interrogatives.
static STOP_WORDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(the|is|are|a|an|in|on|of|do|does|did|what|why|how)\b")
        .expect("Invalid stop-word regex")
});

/// Strict normal form: lower-case, then keep only ASCII letters and digits.
///
/// All whitespace and punctuation collapse away entirely; non-ASCII
/// characters are dropped silently. `"PM2.5 mean?"` becomes `"pm25mean"`.
pub fn strict(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Stop-word-agnostic normal form: lower-case, delete the fixed stop-word
/// list as whole words, then apply the strict character strip.
///
/// Deletion is whole-word only: "this" survives even though it contains
/// "is".
pub fn stop_word_agnostic(input: &str) -> String {
    let lowered = input.to_lowercase();
    let without_stops = STOP_WORDS_RE.replace_all(&lowered, "");
    without_stops
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Strict form ----

    #[test]
    fn test_strict_lowercases() {
        assert_eq!(strict("Hello World"), "helloworld");
    }

    #[test]
    fn test_strict_strips_punctuation_and_whitespace() {
        assert_eq!(strict("PM2.5 mean?"), "pm25mean");
        assert_eq!(strict("  what   is\tthis! "), "whatisthis");
    }

    #[test]
    fn test_strict_keeps_digits() {
        assert_eq!(strict("above 60 ug/m3"), "above60ugm3");
    }

    #[test]
    fn test_strict_empty_input() {
        assert_eq!(strict(""), "");
    }

    #[test]
    fn test_strict_pure_punctuation() {
        assert_eq!(strict("?!.,;:-"), "");
    }

    #[test]
    fn test_strict_drops_non_ascii() {
        assert_eq!(strict("qualité de l'air"), "qualitdelair");
        assert_eq!(strict("µg/m³"), "gm");
        assert_eq!(strict("空気"), "");
    }

    // ---- Stop-word-agnostic form ----

    #[test]
    fn test_agnostic_removes_stop_words() {
        assert_eq!(
            stop_word_agnostic("why is the air quality poor"),
            "airqualitypoor"
        );
    }

    #[test]
    fn test_agnostic_matches_across_rephrasings() {
        assert_eq!(
            stop_word_agnostic("why is the air quality poor"),
            stop_word_agnostic("air quality poor")
        );
        assert_eq!(
            stop_word_agnostic("what does a value above 60 indicate"),
            stop_word_agnostic("value above 60 indicate")
        );
    }

    #[test]
    fn test_agnostic_whole_words_only() {
        // "this" contains "is" but must survive intact
        assert_eq!(stop_word_agnostic("this"), "this");
        // "honest" contains "on"
        assert_eq!(stop_word_agnostic("honest"), "honest");
        // "away" contains "a" and "what" contains "a" only mid-word
        assert_eq!(stop_word_agnostic("away"), "away");
    }

    #[test]
    fn test_agnostic_all_stop_words() {
        assert_eq!(stop_word_agnostic("what is the"), "");
    }

    #[test]
    fn test_agnostic_empty_and_punctuation() {
        assert_eq!(stop_word_agnostic(""), "");
        assert_eq!(stop_word_agnostic("?!?"), "");
    }

    #[test]
    fn test_agnostic_uppercase_stop_words() {
        assert_eq!(stop_word_agnostic("WHAT IS THE STATUS"), "status");
    }

    #[test]
    fn test_agnostic_punctuation_bounded_stop_words() {
        // Punctuation forms a word boundary, so "is" next to "?" is removed
        assert_eq!(stop_word_agnostic("is it harmful?"), "itharmful");
    }
}
