use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// At most this many job-description terms are wrapped.
const MAX_HIGHLIGHT_TOKENS: usize = 200;
const MARK_OPEN: &str = "<mark>";
const MARK_CLOSE: &str = "</mark>";
const LINE_BREAK: &str = "<br>";

static JD_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]{3,}").expect("jd term pattern should compile"));

/// An escaping entity, or a maximal run of word characters.
static ENTITY_OR_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:amp|lt|gt);|\w+").expect("entity or word pattern should compile")
});

/// Wraps every whole-word, case-insensitive occurrence of a job-description
/// term in `<mark>` and turns newlines into `<br>`.
///
/// The resume text is HTML-escaped before any marker is inserted. Wrapping is
/// a single pass over whole words of the escaped text, so a term never matches
/// inside a longer word, an inserted marker or an escaping entity. Only the
/// 200 longest terms are used. With an empty job description the text is
/// returned with line breaks only.
pub fn highlight_jd_keywords(resume_text: &str, jd_text: &str) -> String {
    if jd_text.is_empty() {
        return resume_text.replace('\n', LINE_BREAK);
    }

    let escaped = escape_html(resume_text);
    let terms: HashSet<String> = ordered_terms(jd_text).into_iter().collect();
    if terms.is_empty() {
        return escaped.replace('\n', LINE_BREAK);
    }

    let marked = ENTITY_OR_WORD.replace_all(&escaped, |caps: &Captures| {
        let word = &caps[0];
        if !word.starts_with('&') && terms.contains(&word.to_lowercase()) {
            format!("{MARK_OPEN}{word}{MARK_CLOSE}")
        } else {
            word.to_string()
        }
    });
    marked.replace('\n', LINE_BREAK)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Distinct lower-cased terms, longest first (ties alphabetical), capped.
fn ordered_terms(jd_text: &str) -> Vec<String> {
    let mut terms: Vec<String> = JD_TERM
        .find_iter(jd_text)
        .map(|m| m.as_str().to_lowercase())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    terms.truncate(MAX_HIGHLIGHT_TOKENS);
    terms
}
