//! Rule-based assistant for the Aerogrid dashboard.
//!
//! Provides deterministic resolution of free-text questions against a fixed
//! knowledge base: normalization, priority overrides, a restricted-topic
//! ceiling, and ranked longest-pattern-first substring matching. No natural
//! language understanding, no learning, no conversation state.

pub mod engine;
pub mod error;
pub mod knowledge;
pub mod normalize;

pub use engine::AssistEngine;
pub use error::AssistError;
pub use knowledge::{KnowledgeBase, KnowledgeEntry, PriorityOverride};
