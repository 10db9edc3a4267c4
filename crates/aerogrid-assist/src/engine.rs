//! The query resolution engine.
//!
//! Resolution is a pure function of (query, knowledge base): normalize the
//! query, check the priority overrides, apply the restricted-topic ceiling,
//! then search the knowledge entries longest-pattern-first with two
//! containment strategies, falling back to the default response. Every input
//! terminates in exactly one response; no path errors or suspends.

use crate::error::AssistError;
use crate::knowledge::KnowledgeBase;
use crate::normalize;

/// Stop-word-agnostic patterns at or below this stripped length are skipped
/// to avoid degenerate matches on near-empty patterns.
const MIN_AGNOSTIC_PATTERN_LEN: usize = 3;

/// A knowledge entry with both normal forms precomputed at construction.
#[derive(Debug, Clone)]
struct Candidate {
    /// Raw pattern; its length ranks the candidate.
    pattern: String,
    strict: String,
    agnostic: String,
    response: String,
}

/// An override rule with tokens precomputed to strict form.
#[derive(Debug, Clone)]
struct OverrideRule {
    tokens: Vec<String>,
    response: String,
}

/// Deterministic resolver from free-text queries to canonical responses.
///
/// Construction validates the knowledge base and precomputes every normal
/// form; after that the engine is immutable and resolution needs no locking,
/// so one instance can serve any number of concurrent callers.
pub struct AssistEngine {
    candidates: Vec<Candidate>,
    overrides: Vec<OverrideRule>,
    restricted: Vec<String>,
    default_response: String,
}

impl AssistEngine {
    /// Build an engine from a knowledge base.
    ///
    /// Validation rejects an empty default response, patterns that collide
    /// case-insensitively, and patterns or override tokens that strip to
    /// nothing (an empty strict form would be contained in every query and
    /// shadow the entire knowledge base).
    pub fn new(kb: KnowledgeBase) -> Result<Self, AssistError> {
        if kb.default_response.is_empty() {
            return Err(AssistError::EmptyDefault);
        }

        let mut seen = std::collections::HashSet::new();
        let mut candidates = Vec::with_capacity(kb.entries.len());
        for entry in kb.entries {
            if !seen.insert(entry.pattern.to_lowercase()) {
                return Err(AssistError::DuplicatePattern(entry.pattern));
            }
            let strict = normalize::strict(&entry.pattern);
            if strict.is_empty() {
                return Err(AssistError::DegeneratePattern(entry.pattern));
            }
            if entry.response.is_empty() {
                return Err(AssistError::EmptyResponse(entry.pattern));
            }
            candidates.push(Candidate {
                strict,
                agnostic: normalize::stop_word_agnostic(&entry.pattern),
                pattern: entry.pattern,
                response: entry.response,
            });
        }

        // Longest pattern first; the sort is stable, so equal-length patterns
        // keep their declaration order. That ordering is part of the contract.
        candidates.sort_by(|a, b| b.pattern.len().cmp(&a.pattern.len()));

        let mut overrides = Vec::with_capacity(kb.overrides.len());
        for rule in kb.overrides {
            if rule.tokens.is_empty() {
                return Err(AssistError::EmptyOverride);
            }
            if rule.response.is_empty() {
                return Err(AssistError::EmptyResponse(rule.tokens.join(", ")));
            }
            let mut tokens = Vec::with_capacity(rule.tokens.len());
            for token in rule.tokens {
                let strict = normalize::strict(&token);
                if strict.is_empty() {
                    return Err(AssistError::DegenerateOverrideToken(token));
                }
                tokens.push(strict);
            }
            overrides.push(OverrideRule {
                tokens,
                response: rule.response,
            });
        }

        let restricted = kb
            .restricted
            .into_iter()
            .map(|p| p.to_lowercase())
            .collect();

        Ok(Self {
            candidates,
            overrides,
            restricted,
            default_response: kb.default_response,
        })
    }

    /// Resolve a query to exactly one response.
    ///
    /// Total over all inputs: empty, punctuation-only, and non-ASCII queries
    /// fall through to the default response.
    pub fn resolve(&self, query: &str) -> &str {
        let strict_query = normalize::strict(query);

        // Priority overrides short-circuit everything else.
        for rule in &self.overrides {
            if rule
                .tokens
                .iter()
                .any(|token| strict_query.contains(token.as_str()))
            {
                return &rule.response;
            }
        }

        // Restricted-topic ceiling: forces the default even over a match.
        // Checked on the raw lower-cased text, not the stripped form.
        let raw_lower = query.to_lowercase();
        if self
            .restricted
            .iter()
            .any(|phrase| raw_lower.contains(phrase.as_str()))
        {
            return &self.default_response;
        }

        // Ranked matching: longest pattern first, strict containment before
        // the stop-word-agnostic fallback.
        let agnostic_query = normalize::stop_word_agnostic(query);
        for candidate in &self.candidates {
            if strict_query.contains(candidate.strict.as_str()) {
                return &candidate.response;
            }
            if candidate.agnostic.len() > MIN_AGNOSTIC_PATTERN_LEN
                && agnostic_query.contains(candidate.agnostic.as_str())
            {
                return &candidate.response;
            }
        }

        &self.default_response
    }

    /// The configured default response.
    pub fn default_response(&self) -> &str {
        &self.default_response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{KnowledgeEntry, PriorityOverride};

    const DEFAULT: &str = "I'm not sure about that.";

    /// Small fixture knowledge base exercising every resolution path.
    fn fixture() -> KnowledgeBase {
        KnowledgeBase {
            entries: vec![
                KnowledgeEntry::new("poor", "poor-response"),
                KnowledgeEntry::new("very poor quality", "very-poor-response"),
                KnowledgeEntry::new("why is air quality poor", "why-poor-response"),
                KnowledgeEntry::new("pollution", "pollution-response"),
                KnowledgeEntry::new("hotspot", "hotspot-response"),
            ],
            overrides: vec![PriorityOverride {
                tokens: vec![
                    "above 60".to_string(),
                    "60 indicate".to_string(),
                    "value above 60".to_string(),
                    "60 value".to_string(),
                    "above 60 ug/m3".to_string(),
                ],
                response: "override-response".to_string(),
            }],
            restricted: vec![
                "increase tomorrow".to_string(),
                "safe for me".to_string(),
                "medicine".to_string(),
                "prediction".to_string(),
            ],
            default_response: DEFAULT.to_string(),
        }
    }

    fn engine() -> AssistEngine {
        AssistEngine::new(fixture()).unwrap()
    }

    // ---- Totality ----

    #[test]
    fn test_totality_empty_string() {
        assert_eq!(engine().resolve(""), DEFAULT);
    }

    #[test]
    fn test_totality_whitespace_only() {
        assert_eq!(engine().resolve("   \t\n  "), DEFAULT);
    }

    #[test]
    fn test_totality_pure_punctuation() {
        assert_eq!(engine().resolve("?!?..,;"), DEFAULT);
    }

    #[test]
    fn test_totality_non_ascii() {
        let e = engine();
        assert_eq!(e.resolve("空気の質はどうですか"), DEFAULT);
        // Non-ASCII drops away, leaving the ASCII part to match normally
        assert_eq!(e.resolve("pollution à Hyderabad"), "pollution-response");
    }

    #[test]
    fn test_response_never_empty() {
        let e = engine();
        for q in ["", "x", "zzz", "!!!", "é", "\u{0}"] {
            assert!(!e.resolve(q).is_empty());
        }
    }

    // ---- Determinism ----

    #[test]
    fn test_determinism_repeated_calls() {
        let e = engine();
        let queries = [
            "why is the air quality poor",
            "what does a value above 60 indicate",
            "xyz123",
            "",
        ];
        for q in queries {
            assert_eq!(e.resolve(q), e.resolve(q));
        }
    }

    // ---- Priority override ----

    #[test]
    fn test_override_precedence() {
        // "60" also appears in no entry here, but the point is the override
        // wins without consulting ranked matching at all.
        assert_eq!(
            engine().resolve("what does a value above 60 indicate"),
            "override-response"
        );
    }

    #[test]
    fn test_override_each_token() {
        let e = engine();
        for q in [
            "above 60",
            "does 60 indicate something",
            "value above 60?",
            "is 60 value bad",
            "above 60 ug/m3 reading",
        ] {
            assert_eq!(e.resolve(q), "override-response", "query: {q}");
        }
    }

    #[test]
    fn test_override_beats_entry_match() {
        // Query contains both an override token and a matching entry pattern;
        // the override must win.
        assert_eq!(
            engine().resolve("is pollution above 60 now"),
            "override-response"
        );
    }

    #[test]
    fn test_override_survives_punctuation() {
        assert_eq!(engine().resolve("Above-60!?"), "override-response");
    }

    // ---- Restricted-topic ceiling ----

    #[test]
    fn test_restricted_ceiling_overrides_entry_match() {
        // "pollution" would match an entry, but the restricted phrase forces
        // the default.
        assert_eq!(
            engine().resolve("will pollution increase tomorrow"),
            DEFAULT
        );
    }

    #[test]
    fn test_restricted_all_phrases() {
        let e = engine();
        for q in [
            "will it increase tomorrow",
            "is it safe for me to jog",
            "what medicine should I take",
            "give me a prediction",
        ] {
            assert_eq!(e.resolve(q), DEFAULT, "query: {q}");
        }
    }

    #[test]
    fn test_restricted_checked_after_override() {
        // Both an override token and a restricted phrase present: the
        // override is checked first and wins.
        assert_eq!(
            engine().resolve("will values above 60 increase tomorrow"),
            "override-response"
        );
    }

    #[test]
    fn test_restricted_is_raw_not_stripped() {
        // "increasetomorrow" without the space is not the restricted phrase;
        // the raw lower-cased query must contain it verbatim.
        assert_eq!(engine().resolve("increasetomorrow"), DEFAULT); // no entry matches either
        assert_eq!(
            engine().resolve("pollution increasetomorrow"),
            "pollution-response"
        );
    }

    // ---- Ranked matching: specificity ----

    #[test]
    fn test_specificity_longest_pattern_wins() {
        // Both "poor" and "very poor quality" are contained; the longer,
        // more specific pattern must win.
        assert_eq!(
            engine().resolve("why is it very poor quality today"),
            "very-poor-response"
        );
    }

    #[test]
    fn test_shorter_pattern_still_matches_alone() {
        assert_eq!(engine().resolve("poor"), "poor-response");
    }

    #[test]
    fn test_equal_length_tie_breaks_by_declaration_order() {
        let kb = KnowledgeBase {
            entries: vec![
                KnowledgeEntry::new("alpha one", "first"),
                KnowledgeEntry::new("gamma two", "second"),
            ],
            overrides: vec![],
            restricted: vec![],
            default_response: DEFAULT.to_string(),
        };
        let e = AssistEngine::new(kb).unwrap();
        // Query contains both equal-length patterns; first-declared wins.
        assert_eq!(e.resolve("alpha one gamma two"), "first");
        assert_eq!(e.resolve("gamma two then alpha one"), "first");
    }

    // ---- Ranked matching: stop-word tolerance ----

    #[test]
    fn test_stop_word_tolerant_match() {
        // Strict forms differ ("whyisairqualitypoor" is not a substring of
        // "whyistheairqualitypoor"), but both strip to "airqualitypoor".
        assert_eq!(
            engine().resolve("why is the air quality poor"),
            "why-poor-response"
        );
    }

    #[test]
    fn test_stop_word_match_requires_min_length() {
        // "a b" strips to "b" (length 1 <= 3): the agnostic strategy must
        // not fire, and the strict form "ab" is not contained either.
        let kb = KnowledgeBase {
            entries: vec![KnowledgeEntry::new("a b", "degenerate")],
            overrides: vec![],
            restricted: vec![],
            default_response: DEFAULT.to_string(),
        };
        let e = AssistEngine::new(kb).unwrap();
        assert_eq!(e.resolve("x y b"), DEFAULT);
    }

    #[test]
    fn test_strict_containment_ignores_spacing() {
        assert_eq!(engine().resolve("HOTSPOT?!"), "hotspot-response");
        assert_eq!(engine().resolve("hot spot"), "hotspot-response");
    }

    // ---- Default fallback ----

    #[test]
    fn test_default_fallback_exact() {
        assert_eq!(engine().resolve("xyz123"), DEFAULT);
    }

    #[test]
    fn test_default_response_accessor() {
        assert_eq!(engine().default_response(), DEFAULT);
    }

    // ---- Validation ----

    #[test]
    fn test_rejects_empty_default() {
        let mut kb = fixture();
        kb.default_response = String::new();
        assert!(matches!(
            AssistEngine::new(kb),
            Err(AssistError::EmptyDefault)
        ));
    }

    #[test]
    fn test_rejects_duplicate_pattern_case_insensitive() {
        let mut kb = fixture();
        kb.entries.push(KnowledgeEntry::new("HotSpot", "other"));
        assert!(matches!(
            AssistEngine::new(kb),
            Err(AssistError::DuplicatePattern(p)) if p == "HotSpot"
        ));
    }

    #[test]
    fn test_rejects_empty_entry_response() {
        let mut kb = fixture();
        kb.entries.push(KnowledgeEntry::new("silent", ""));
        assert!(matches!(
            AssistEngine::new(kb),
            Err(AssistError::EmptyResponse(p)) if p == "silent"
        ));
    }

    #[test]
    fn test_rejects_degenerate_pattern() {
        let mut kb = fixture();
        kb.entries.push(KnowledgeEntry::new("?!?", "noise"));
        assert!(matches!(
            AssistEngine::new(kb),
            Err(AssistError::DegeneratePattern(_))
        ));
    }

    #[test]
    fn test_rejects_empty_override_rule() {
        let mut kb = fixture();
        kb.overrides.push(PriorityOverride {
            tokens: vec![],
            response: "unused".to_string(),
        });
        assert!(matches!(
            AssistEngine::new(kb),
            Err(AssistError::EmptyOverride)
        ));
    }

    #[test]
    fn test_rejects_degenerate_override_token() {
        let mut kb = fixture();
        kb.overrides[0].tokens.push("---".to_string());
        assert!(matches!(
            AssistEngine::new(kb),
            Err(AssistError::DegenerateOverrideToken(_))
        ));
    }

    // ---- Concurrent use ----

    #[test]
    fn test_shared_engine_across_threads() {
        let e = std::sync::Arc::new(engine());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let e = std::sync::Arc::clone(&e);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        assert_eq!(
                            e.resolve("why is the air quality poor"),
                            "why-poor-response"
                        );
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
    }

    // ---- Built-in knowledge smoke tests ----

    #[test]
    fn test_builtin_greeting() {
        let e = AssistEngine::new(KnowledgeBase::builtin()).unwrap();
        assert!(e.resolve("hello").contains("TGPCB Air Quality Assistant"));
    }

    #[test]
    fn test_builtin_pm25_question() {
        let e = AssistEngine::new(KnowledgeBase::builtin()).unwrap();
        assert!(e
            .resolve("What is PM2.5?")
            .contains("fine particulate matter"));
    }

    #[test]
    fn test_builtin_threshold_override() {
        let e = AssistEngine::new(KnowledgeBase::builtin()).unwrap();
        let reply = e.resolve("what does a value above 60 indicate");
        assert!(reply.contains("'Poor' air quality"));
        assert!(reply.contains("'Very Poor'"));
    }

    #[test]
    fn test_builtin_restricted_prediction() {
        let e = AssistEngine::new(KnowledgeBase::builtin()).unwrap();
        assert_eq!(
            e.resolve("will pollution increase tomorrow"),
            e.default_response()
        );
    }

    #[test]
    fn test_builtin_precautions() {
        let e = AssistEngine::new(KnowledgeBase::builtin()).unwrap();
        assert!(e
            .resolve("what precautions should we take")
            .contains("N95 masks"));
    }

    #[test]
    fn test_builtin_default_fallback() {
        let e = AssistEngine::new(KnowledgeBase::builtin()).unwrap();
        assert_eq!(e.resolve("xyz123"), e.default_response());
    }

    #[test]
    fn test_builtin_stop_word_rephrasing() {
        let e = AssistEngine::new(KnowledgeBase::builtin()).unwrap();
        // "why is the air quality poor" must reach the "why is air quality
        // poor" entry through the stop-word-agnostic strategy.
        assert!(e
            .resolve("why is the air quality poor")
            .contains("traffic emissions"));
    }

    #[test]
    fn test_builtin_very_poor_beats_poor() {
        let e = AssistEngine::new(KnowledgeBase::builtin()).unwrap();
        assert!(e
            .resolve("the air is very poor today")
            .contains("exceeds 90"));
    }
}
