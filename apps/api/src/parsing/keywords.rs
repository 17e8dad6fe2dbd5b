use std::collections::HashSet;

use crate::nlp::TextAnalyzer;

/// Upper bound on keywords kept per resume.
pub const MAX_KEYWORDS: usize = 120;
const MIN_KEYWORD_CHARS: usize = 3;

/// Lower-cased noun and proper-noun lemmas in first-occurrence order.
///
/// Only alphabetic tokens count, lemmas shorter than three characters are
/// dropped, and the list is cut at `MAX_KEYWORDS`.
pub fn extract_resume_keywords(text: &str, analyzer: &dyn TextAnalyzer) -> Vec<String> {
    let mut seen = HashSet::new();
    analyzer
        .analyze(text)
        .into_iter()
        .filter(|t| t.pos.is_nominal() && t.is_alpha)
        .map(|t| t.lemma.to_lowercase())
        .filter(|lemma| lemma.chars().count() >= MIN_KEYWORD_CHARS && seen.insert(lemma.clone()))
        .take(MAX_KEYWORDS)
        .collect()
}
