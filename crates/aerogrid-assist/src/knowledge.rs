//! Knowledge base configuration for the query resolution engine.
//!
//! The knowledge base is an explicit, ordered configuration object injected
//! into [`crate::AssistEngine`] at construction: pattern/response pairs, the
//! priority override rules, the restricted-topic phrases, and the default
//! fallback response. It is loaded once and never mutated at runtime; tests
//! substitute a small fixture set instead of the production one.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AssistError;

/// One pattern/response pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Canonical phrasing matched against normalized queries.
    pub pattern: String,
    /// Response returned when the pattern matches.
    pub response: String,
}

impl KnowledgeEntry {
    pub fn new(pattern: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            response: response.into(),
        }
    }
}

/// A priority override: literal tokens that, when contained in the
/// strict-normalized query, force the bound response before ranked matching
/// runs. Exists so numeric-threshold questions cannot tie with the several
/// entries that also contain "60" or "above".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityOverride {
    /// Trigger phrases, compared in strict-normalized form.
    pub tokens: Vec<String>,
    /// Response returned on any token hit.
    pub response: String,
}

/// The full, ordered knowledge configuration for one engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBase {
    /// Pattern/response pairs in declaration order. Order is load-bearing:
    /// it breaks ties between equal-length patterns.
    pub entries: Vec<KnowledgeEntry>,
    /// Override rules evaluated before ranked matching, in order.
    #[serde(default)]
    pub overrides: Vec<PriorityOverride>,
    /// Out-of-scope phrases checked against the raw lower-cased query.
    #[serde(default)]
    pub restricted: Vec<String>,
    /// Response returned when nothing matches (and for restricted topics).
    pub default_response: String,
}

impl KnowledgeBase {
    /// Load a knowledge base from a TOML file.
    pub fn load(path: &Path) -> Result<Self, AssistError> {
        let content = std::fs::read_to_string(path)?;
        let kb: KnowledgeBase =
            toml::from_str(&content).map_err(|e| AssistError::Parse(e.to_string()))?;
        info!(
            path = %path.display(),
            entries = kb.entries.len(),
            "Knowledge base loaded"
        );
        Ok(kb)
    }

    /// The built-in production knowledge set for the air-quality assistant.
    pub fn builtin() -> Self {
        let entries = vec![
            // --- PM2.5 & air quality basics ---
            KnowledgeEntry::new(
                "what is pm2.5",
                "PM2.5 refers to fine particulate matter less than 2.5 micrometers in diameter. \
                 These particles are smaller than a human hair and can penetrate deep into the \
                 lungs and bloodstream.",
            ),
            KnowledgeEntry::new(
                "pm2.5 mean",
                "PM2.5 stands for Particulate Matter 2.5. It is a key indicator of air \
                 pollution, consisting of sulfate, nitrates, and black carbon.",
            ),
            KnowledgeEntry::new(
                "why is air quality poor",
                "Air quality is 'Poor' (61-90 µg/m³) due to high traffic emissions, industrial \
                 activity, construction dust, and weather conditions that trap pollutants.",
            ),
            KnowledgeEntry::new(
                "poor quality",
                "Air quality is considered 'Poor' when PM2.5 levels are between 61-90 µg/m³. \
                 Sensitive groups should reduce outdoor activity.",
            ),
            KnowledgeEntry::new(
                "very poor",
                "Air quality is 'Very Poor' when PM2.5 exceeds 90 µg/m³. This is a serious \
                 health risk, and everyone should avoid outdoor exertion.",
            ),
            KnowledgeEntry::new(
                "good quality",
                "Air quality is 'Good' when PM2.5 is below 30 µg/m³. It poses little or no risk.",
            ),
            KnowledgeEntry::new(
                "moderate quality",
                "Air quality is 'Moderate' (31-60 µg/m³). It is generally acceptable, but \
                 sensitive people might have minor issues.",
            ),
            // --- Health & safety ---
            KnowledgeEntry::new(
                "is it harmful",
                "Yes, high PM2.5 levels are harmful. They can cause respiratory issues, heart \
                 disease, and aggravate asthma. Long-term exposure is linked to reduced lung \
                 function.",
            ),
            KnowledgeEntry::new(
                "health effects",
                "Exposure to high PM2.5 can lead to coughing, shortness of breath, asthma \
                 attacks, and chronic bronchitis.",
            ),
            KnowledgeEntry::new(
                "safe level",
                "The safest PM2.5 level is 0-30 µg/m³. Above 60 µg/m³ is considered unhealthy.",
            ),
            KnowledgeEntry::new(
                "precautions",
                "1. Wear N95 masks outdoors.\n2. Use air purifiers indoors.\n3. Keep windows \
                 closed during peak traffic hours.\n4. Avoid morning jogs in smoggy areas.",
            ),
            KnowledgeEntry::new(
                "should i go out",
                "If the status is 'Poor' or 'Very Poor', it is best to stay indoors, especially \
                 for children and the elderly.",
            ),
            // --- Dashboard features ---
            KnowledgeEntry::new(
                "what is an active alert",
                "An 'Active Alert' is triggered when a specific grid zone reports PM2.5 levels \
                 above 90 µg/m³ (Very Poor) for sustained periods.",
            ),
            KnowledgeEntry::new(
                "how do you measure",
                "We act as a decision support system using a grid of hyperlocal sensors that \
                 measure PM2.5 concentration in real-time.",
            ),
            KnowledgeEntry::new(
                "hotspot",
                "A 'Hotspot' is a zone that consistently reports high pollution levels compared \
                 to its neighbors.",
            ),
            KnowledgeEntry::new(
                "refresh rate",
                "The dashboard updates every 60 seconds with the latest sensor data.",
            ),
            KnowledgeEntry::new(
                "comparison mode",
                "You can compare two zones side-by-side by selecting a zone, clicking \
                 'Compare', and then selecting a second zone.",
            ),
            // --- General conversation ---
            KnowledgeEntry::new(
                "hello",
                "Hello! I am the TGPCB Air Quality Assistant. I can answer questions about \
                 Hyderabad's air quality, PM2.5 levels, and safety precautions.",
            ),
            KnowledgeEntry::new(
                "hi",
                "Hi there! How can I help you with air quality information today?",
            ),
            KnowledgeEntry::new(
                "who are you",
                "I am an AI assistant designed to help you understand the Hyderabad Hyperlocal \
                 Air Quality Monitoring System.",
            ),
            KnowledgeEntry::new("thank you", "You're welcome! Stay safe and breathe easy."),
            KnowledgeEntry::new(
                "help",
                "You can ask me things like:\n- 'What is PM2.5?'\n- 'Why is it poor?'\n- 'What \
                 are the precautions?'\n- 'Is it safe outside?'",
            ),
            // --- Thresholds ---
            KnowledgeEntry::new(
                "value 60",
                "A value above 60 µg/m³ indicates 'Poor' air quality.",
            ),
        ];

        let overrides = vec![PriorityOverride {
            tokens: vec![
                "above 60".to_string(),
                "60 indicate".to_string(),
                "value above 60".to_string(),
                "60 value".to_string(),
                "above 60 ug/m3".to_string(),
            ],
            response: "A value above 60 µg/m³ indicates 'Poor' air quality. If it exceeds 90 \
                       µg/m³, it is classified as 'Very Poor'. Alerting authorities is \
                       recommended."
                .to_string(),
        }];

        let restricted = vec![
            "increase tomorrow".to_string(),
            "safe for me".to_string(),
            "medicine".to_string(),
            "prediction".to_string(),
        ];

        Self {
            entries,
            overrides,
            restricted,
            default_response: "I'm not sure about that. Try asking about 'PM2.5', 'Health \
                               Effects', 'Precautions', or 'Air Quality Levels'."
                .to_string(),
        }
    }
}
