//! Text-analysis provider seam.
//!
//! Field extractors need two capabilities they do not implement themselves:
//! part-of-speech tagging with lemmas (for resume keywords) and named-entity
//! spans (the last-resort candidate name). Both come through `TextAnalyzer`,
//! carried in `AppState` as `Arc<dyn TextAnalyzer>`, so a model-backed
//! provider can replace the built-in `RuleBasedAnalyzer` without touching the
//! parser.

pub mod rule_based;

use serde::{Deserialize, Serialize};

pub use rule_based::RuleBasedAnalyzer;

/// Coarse universal part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    Noun,
    Propn,
    Verb,
    Aux,
    Adj,
    Adv,
    Adp,
    Det,
    Pron,
    Cconj,
    Part,
    Num,
    Punct,
    Sym,
    X,
}

impl PartOfSpeech {
    /// Common or proper noun.
    pub fn is_nominal(self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::Propn)
    }
}

/// One token as reported by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedToken {
    pub text: String,
    pub lemma: String,
    pub pos: PartOfSpeech,
    /// Every character is alphabetic.
    pub is_alpha: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    Person,
    Org,
}

/// A labelled entity span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
}

/// Pluggable lemma/POS and entity provider.
pub trait TextAnalyzer: Send + Sync {
    /// Human-readable backend identifier (e.g. "rule-based").
    fn backend_id(&self) -> &str;

    /// Tokens of `text` in source order.
    fn analyze(&self, text: &str) -> Vec<AnalyzedToken>;

    /// Entity spans of `text` in source order.
    fn entities(&self, text: &str) -> Vec<EntitySpan>;
}
