//! Built-in text-analysis provider.
//!
//! No model files and no runtime downloads: tokens are tagged from closed-class
//! word lists, capitalisation and suffixes, lemmas come from inflection
//! stripping plus an irregular-form table, and PERSON/ORG spans come from
//! capitalised runs. Accuracy is modest but deterministic.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use super::{AnalyzedToken, EntityLabel, EntitySpan, PartOfSpeech, TextAnalyzer};

pub struct RuleBasedAnalyzer;

impl RuleBasedAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RuleBasedAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextAnalyzer for RuleBasedAnalyzer {
    fn backend_id(&self) -> &str {
        "rule-based"
    }

    fn analyze(&self, text: &str) -> Vec<AnalyzedToken> {
        let mut tokens = Vec::new();
        for line in text.lines() {
            let mut sentence_start = true;
            for m in TOKEN.find_iter(line) {
                let raw = m.as_str();
                let pos = tag(raw, sentence_start);
                tokens.push(AnalyzedToken {
                    text: raw.to_string(),
                    lemma: lemmatize(raw, pos),
                    pos,
                    is_alpha: raw.chars().all(char::is_alphabetic),
                });
                sentence_start = matches!(raw, "." | "!" | "?" | ":" | ";" | "•" | "|" | "-");
            }
        }
        tokens
    }

    fn entities(&self, text: &str) -> Vec<EntitySpan> {
        let mut found: Vec<(usize, EntitySpan)> = Vec::new();
        let mut offset = 0;

        for line in text.split('\n') {
            let orgs: Vec<(usize, usize)> = ORG_NAME
                .find_iter(line)
                .map(|m| (m.start(), m.end()))
                .collect();
            for &(start, end) in &orgs {
                found.push((
                    offset + start,
                    EntitySpan {
                        text: line[start..end].trim().to_string(),
                        label: EntityLabel::Org,
                    },
                ));
            }

            for m in CAPITALIZED_RUN.find_iter(line) {
                let overlaps_org = orgs.iter().any(|&(s, e)| m.start() < e && s < m.end());
                if !overlaps_org && is_plausible_person(m.as_str()) {
                    found.push((
                        offset + m.start(),
                        EntitySpan {
                            text: m.as_str().to_string(),
                            label: EntityLabel::Person,
                        },
                    ));
                }
            }

            offset += line.len() + 1;
        }

        found.sort_by_key(|(start, _)| *start);
        found.into_iter().map(|(_, span)| span).collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Patterns
// ────────────────────────────────────────────────────────────────────────────

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{L}+|\p{N}+(?:\.\p{N}+)?|[^\s\p{L}\p{N}]")
        .expect("token pattern should compile")
});

static CAPITALIZED_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\p{Lu}\p{Ll}+(?:[ \t]+\p{Lu}\p{Ll}+){1,3}\b")
        .expect("capitalized run pattern should compile")
});

static ORG_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\p{Lu}[\p{L}&.]*[ \t]+){0,4}(?:University|Institute|College|Academy|Inc|Ltd|LLC|Corporation|Technologies|Labs|Solutions|Systems)\b(?:[ \t]+of(?:[ \t]+\p{Lu}\p{L}+)+)?",
    )
    .expect("organization pattern should compile")
});

// ────────────────────────────────────────────────────────────────────────────
// Word lists
// ────────────────────────────────────────────────────────────────────────────

static CLOSED_CLASS: LazyLock<HashMap<&'static str, PartOfSpeech>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    let groups: [(&[&str], PartOfSpeech); 7] = [
        (
            &[
                "a", "an", "the", "this", "that", "these", "those", "each", "every", "some",
                "any", "no", "all", "both", "another", "such",
            ],
            PartOfSpeech::Det,
        ),
        (
            &[
                "i", "me", "my", "mine", "we", "us", "our", "you", "your", "he", "him", "his",
                "she", "her", "it", "its", "they", "them", "their", "who", "whom", "which",
                "what", "myself", "itself",
            ],
            PartOfSpeech::Pron,
        ),
        (
            &[
                "in", "on", "at", "for", "with", "by", "from", "of", "into", "onto", "over",
                "under", "across", "through", "within", "without", "about", "between", "among",
                "during", "via", "per", "towards", "toward", "against", "upon", "around",
                "after", "before", "since", "until",
            ],
            PartOfSpeech::Adp,
        ),
        (
            &[
                "and", "or", "but", "nor", "yet", "so", "while", "because", "although", "if",
                "whereas", "unless", "than",
            ],
            PartOfSpeech::Cconj,
        ),
        (
            &[
                "is", "am", "are", "was", "were", "be", "been", "being", "have", "has", "had",
                "do", "does", "did", "will", "would", "can", "could", "should", "may", "might",
                "must", "shall",
            ],
            PartOfSpeech::Aux,
        ),
        (&["not", "to", "n't"], PartOfSpeech::Part),
        (
            &[
                "also", "very", "well", "currently", "highly", "more", "most", "then", "there",
                "here", "now", "often", "always", "never", "again", "just", "only", "too",
            ],
            PartOfSpeech::Adv,
        ),
    ];
    for (words, pos) in groups {
        for &word in words {
            map.insert(word, pos);
        }
    }
    map
});

static IRREGULAR_VERBS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("built", "build"),
        ("led", "lead"),
        ("ran", "run"),
        ("wrote", "write"),
        ("written", "write"),
        ("made", "make"),
        ("won", "win"),
        ("taught", "teach"),
        ("brought", "bring"),
        ("drove", "drive"),
        ("driven", "drive"),
        ("grew", "grow"),
        ("grown", "grow"),
        ("began", "begin"),
        ("held", "hold"),
        ("took", "take"),
        ("taken", "take"),
        ("gave", "give"),
        ("given", "give"),
        ("found", "find"),
        ("sold", "sell"),
        ("spent", "spend"),
        ("set", "set"),
        ("cut", "cut"),
    ]
    .into_iter()
    .collect()
});

static BASE_VERBS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "build", "develop", "manage", "create", "implement", "improve", "deploy", "maintain",
        "optimize", "optimise", "reduce", "deliver", "write", "collaborate", "migrate",
        "automate", "analyze", "analyse", "integrate",
    ]
    .into_iter()
    .collect()
});

static ADJECTIVES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "strong", "good", "new", "senior", "junior", "excellent", "proficient", "large",
        "small", "high", "low", "key", "main", "full", "various", "multiple", "several",
        "real", "modern", "solid", "deep", "fast", "best", "great", "proven", "agile",
        "remote", "hands", "open",
    ]
    .into_iter()
    .collect()
});

static ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "able", "ible", "less", "ical", "ive"];

/// Nouns that the suffix rules would otherwise mis-tag.
static SUFFIX_EXCEPTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "objective", "executive", "initiative", "representative", "alternative",
        "perspective", "incentive", "archive", "narrative", "detective", "engineering",
        "training", "marketing", "programming", "testing", "computing", "learning",
        "networking", "accounting", "banking", "consulting", "building", "meeting",
        "planning", "processing", "modeling", "modelling", "hosting", "scheduling", "pricing",
        "funding", "writing", "reporting", "hiring", "onboarding", "scripting", "caching",
        "logging", "monitoring", "debugging", "family", "supply", "assembly", "fly", "ally",
        "need", "speed", "feed", "seed", "bed", "red", "shed",
    ]
    .into_iter()
    .collect()
});

static IRREGULAR_NOUNS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("people", "person"),
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("analyses", "analysis"),
        ("criteria", "criterion"),
        ("indices", "index"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("mice", "mouse"),
        ("theses", "thesis"),
    ]
    .into_iter()
    .collect()
});

/// Words that disqualify a capitalised run from being a person's name.
static NON_NAME_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "experience", "education", "skills", "skill", "summary", "objective", "profile",
        "projects", "project", "certifications", "certification", "achievements", "awards",
        "contact", "references", "languages", "interests", "professional", "technical",
        "work", "history", "employment", "career", "personal", "details", "engineer",
        "engineering", "developer", "development", "manager", "management", "analyst",
        "scientist", "science", "intern", "internship", "consultant", "architect", "lead",
        "senior", "junior", "principal", "staff", "head", "director", "officer", "software",
        "data", "machine", "learning", "computer", "systems", "technology", "technologies",
        "university", "college", "institute", "school", "academy", "bachelor", "master",
        "degree", "street", "road", "avenue", "city", "new", "york", "san", "francisco",
        "january", "february", "march", "april", "may", "june", "july", "august",
        "september", "october", "november", "december", "present", "current", "resume",
        "curriculum", "vitae", "the", "and", "of", "for", "with", "team", "company",
    ]
    .into_iter()
    .collect()
});

// ────────────────────────────────────────────────────────────────────────────
// Tagging and lemmatization
// ────────────────────────────────────────────────────────────────────────────

fn tag(raw: &str, sentence_start: bool) -> PartOfSpeech {
    let Some(first) = raw.chars().next() else {
        return PartOfSpeech::X;
    };
    if first.is_numeric() {
        return PartOfSpeech::Num;
    }
    if !first.is_alphabetic() {
        return if "+#$%&@*/=<>~^".contains(first) {
            PartOfSpeech::Sym
        } else {
            PartOfSpeech::Punct
        };
    }

    let lower = raw.to_lowercase();
    if let Some(&pos) = CLOSED_CLASS.get(lower.as_str()) {
        return pos;
    }

    let char_count = raw.chars().count();
    if char_count >= 2 && raw.chars().all(|c| c.is_uppercase()) {
        return PartOfSpeech::Propn;
    }
    if first.is_uppercase() && !sentence_start {
        return PartOfSpeech::Propn;
    }

    if BASE_VERBS.contains(lower.as_str()) || IRREGULAR_VERBS.contains_key(lower.as_str()) {
        return PartOfSpeech::Verb;
    }
    if ADJECTIVES.contains(lower.as_str()) {
        return PartOfSpeech::Adj;
    }
    if SUFFIX_EXCEPTIONS.contains(lower.as_str()) || char_count <= 4 {
        return PartOfSpeech::Noun;
    }
    if lower.ends_with("ly") {
        return PartOfSpeech::Adv;
    }
    if lower.ends_with("ing") || lower.ends_with("ed") {
        return PartOfSpeech::Verb;
    }
    if ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return PartOfSpeech::Adj;
    }
    PartOfSpeech::Noun
}

fn lemmatize(raw: &str, pos: PartOfSpeech) -> String {
    let lower = raw.to_lowercase();
    match pos {
        PartOfSpeech::Noun => singular(&lower),
        PartOfSpeech::Verb => verb_base(&lower),
        PartOfSpeech::Aux => match lower.as_str() {
            "is" | "am" | "are" | "was" | "were" | "been" | "being" => "be".to_string(),
            "has" | "had" => "have".to_string(),
            "does" | "did" => "do".to_string(),
            _ => lower,
        },
        _ => lower,
    }
}

fn singular(word: &str) -> String {
    if let Some(&lemma) = IRREGULAR_NOUNS.get(word) {
        return lemma.to_string();
    }
    if word.len() > 4 && word.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    for suffix in ["sses", "ches", "shes", "xes", "zes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    let keeps_s = ["ss", "us", "is", "ous"].iter().any(|s| word.ends_with(s));
    if word.len() > 3 && word.ends_with('s') && !keeps_s {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

fn verb_base(word: &str) -> String {
    if let Some(&base) = IRREGULAR_VERBS.get(word) {
        return base.to_string();
    }
    if word.len() > 4 && word.ends_with("ied") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    let stem = if word.len() > 5 && word.ends_with("ing") {
        &word[..word.len() - 3]
    } else if word.len() > 4 && word.ends_with("ed") {
        &word[..word.len() - 2]
    } else {
        return word.to_string();
    };
    undouble(stem)
}

/// "runn" -> "run", "shipp" -> "ship"; leaves "install", "pass" alone.
fn undouble(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 3
        && bytes[n - 1].is_ascii_alphabetic()
        && bytes[n - 1] == bytes[n - 2]
        && !matches!(bytes[n - 1], b'l' | b's' | b'z')
    {
        return stem[..n - 1].to_string();
    }
    stem.to_string()
}

fn is_plausible_person(candidate: &str) -> bool {
    let parts: Vec<&str> = candidate.split_whitespace().collect();
    (2..=4).contains(&parts.len())
        && parts.iter().all(|p| {
            p.chars().count() >= 2 && !NON_NAME_WORDS.contains(p.to_lowercase().as_str())
        })
}
