//! ATS scoring: pluggable, trait-based scorer comparing a parsed resume with
//! job-description text.
//!
//! Default: `KeywordAtsScorer` (token overlap, deterministic). `AppState`
//! holds an `Arc<dyn AtsScorer>`, swapped at startup.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::AtsResult;

/// Weight of one matched skill.
const SKILL_WEIGHT: f64 = 6.0;
/// Weight of one matched resume keyword.
const KEYWORD_WEIGHT: f64 = 4.0;
const MIN_TOKEN_CHARS: usize = 3;

static ALPHA_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]+").expect("alpha run pattern should compile"));

/// The scorer trait. Implement this to swap backends without touching the
/// batch pipeline or handlers.
pub trait AtsScorer: Send + Sync {
    fn backend_id(&self) -> &str;

    fn score(&self, skills: &[String], keywords: &[String], jd_text: &str) -> AtsResult;
}

pub struct KeywordAtsScorer;

impl AtsScorer for KeywordAtsScorer {
    fn backend_id(&self) -> &str {
        "keyword"
    }

    fn score(&self, skills: &[String], keywords: &[String], jd_text: &str) -> AtsResult {
        compute_ats_score(skills, keywords, jd_text)
    }
}

/// Lower-cased ASCII letter runs of three or more characters.
pub fn jd_tokens(jd_text: &str) -> HashSet<String> {
    let low = jd_text.to_lowercase();
    ALPHA_RUN
        .find_iter(&low)
        .map(|m| m.as_str())
        .filter(|w| w.len() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// `(6 * skill hits + 4 * keyword hits) / |jd tokens| * 100`, capped at 100
/// and rounded to two decimals. An empty job description scores zero.
pub fn compute_ats_score(skills: &[String], keywords: &[String], jd_text: &str) -> AtsResult {
    if jd_text.is_empty() {
        return AtsResult::default();
    }

    let tokens = jd_tokens(jd_text);
    let skills_overlap = skills
        .iter()
        .map(|s| s.to_lowercase())
        .collect::<HashSet<_>>()
        .iter()
        .filter(|s| tokens.contains(s.as_str()))
        .count();
    let keywords_overlap = keywords
        .iter()
        .collect::<HashSet<_>>()
        .into_iter()
        .filter(|k| tokens.contains(k.as_str()))
        .count();

    let raw = (skills_overlap as f64 * SKILL_WEIGHT + keywords_overlap as f64 * KEYWORD_WEIGHT)
        / tokens.len().max(1) as f64
        * 100.0;
    let score = if tokens.is_empty() {
        0.0
    } else {
        raw.min(100.0)
    };

    AtsResult {
        score: round_to_cents(score),
        skills_overlap,
        keywords_overlap,
    }
}

/// Two decimals, rounding the exact binary value with ties to even, so that
/// 15.625 becomes 15.62 and 2.675 (stored just below) becomes 2.67.
fn round_to_cents(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
