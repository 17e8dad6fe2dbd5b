//! Candidate name heuristic.
//!
//! Best effort only: an all-caps header line wins, then a Title Case line,
//! then the first PERSON entity from the text-analysis provider. Resumes with
//! unusual headers will produce false negatives.

use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::NormalizedText;
use crate::nlp::{EntityLabel, TextAnalyzer};
use crate::parsing::skills::title_case;
use crate::parsing::vocabulary::Vocabulary;

/// How many leading lines are considered a resume header.
const HEADER_LINES: usize = 10;

static ALL_CAPS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z\s]+$").expect("all-caps pattern should compile"));

static TITLE_CASE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z]+(\s[A-Z][a-z]+)+$").expect("title-case pattern should compile")
});

pub fn extract_name(
    text: &NormalizedText,
    vocabulary: &Vocabulary,
    analyzer: &dyn TextAnalyzer,
) -> Option<String> {
    guess_name_from_lines(text.lines(), vocabulary).or_else(|| {
        analyzer
            .entities(text.as_str())
            .into_iter()
            .find(|e| e.label == EntityLabel::Person && has_name_word_count(&e.text))
            .map(|e| e.text)
    })
}

/// The two header-scan stages, without the entity fallback.
pub fn guess_name_from_lines(lines: &[String], vocabulary: &Vocabulary) -> Option<String> {
    let header: Vec<&str> = lines
        .iter()
        .take(HEADER_LINES)
        .map(|l| l.trim())
        .filter(|l| is_name_candidate(l, vocabulary))
        .collect();

    header
        .iter()
        .find(|l| has_name_word_count(l) && ALL_CAPS_LINE.is_match(l))
        .map(|l| title_case(l))
        .or_else(|| {
            header
                .iter()
                .find(|l| has_name_word_count(l) && TITLE_CASE_LINE.is_match(l))
                .map(|l| l.to_string())
        })
}

/// No digit and no master-skill substring.
fn is_name_candidate(line: &str, vocabulary: &Vocabulary) -> bool {
    if line.chars().any(|c| c.is_numeric()) {
        return false;
    }
    let low = line.to_lowercase();
    !vocabulary.skills().iter().any(|s| low.contains(s.as_str()))
}

fn has_name_word_count(s: &str) -> bool {
    (2..=4).contains(&s.split_whitespace().count())
}
