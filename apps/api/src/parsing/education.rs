use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::parsing::skills::match_keywords;
use crate::parsing::vocabulary::Vocabulary;

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("year pattern should compile"));

/// Matched degree keywords (title-cased) plus every line that names a degree
/// and carries a 19xx/20xx year. Returned sorted; order carries no meaning.
pub fn extract_education(text: &str, vocabulary: &Vocabulary) -> Vec<String> {
    let degrees = vocabulary.degree_keywords();
    let mut found: BTreeSet<String> = match_keywords(text, degrees).into_iter().collect();

    for line in text.lines() {
        let low = line.to_lowercase();
        if degrees.iter().any(|d| low.contains(d.as_str())) && YEAR.is_match(line) {
            found.insert(line.trim().to_string());
        }
    }

    found.into_iter().collect()
}
