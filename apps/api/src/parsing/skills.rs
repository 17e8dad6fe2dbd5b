use std::collections::BTreeSet;

use crate::models::SkillGroups;

use crate::parsing::vocabulary::Vocabulary;

/// Upper-cases the first cased letter of every word and lower-cases the rest.
/// A word starts after any character without case, so "c++" becomes "C++",
/// "scikit-learn" becomes "Scikit-Learn" and "b.tech" becomes "B.Tech".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for c in s.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if cased && !prev_cased {
            out.extend(c.to_uppercase());
        } else if cased {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }
    out
}

/// Case-insensitive substring match of every keyword against `text`.
/// Hits come back title-cased, deduplicated and sorted.
pub fn match_keywords<S: AsRef<str>>(text: &str, keywords: &[S]) -> Vec<String> {
    let low = text.to_lowercase();
    keywords
        .iter()
        .map(AsRef::as_ref)
        .filter(|k| !k.is_empty() && low.contains(&k.to_lowercase()))
        .map(title_case)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Flat skill list drawn from the master vocabulary.
pub fn extract_skills(text: &str, vocabulary: &Vocabulary) -> Vec<String> {
    match_keywords(text, vocabulary.skills())
}

/// Skill hits grouped by category, in vocabulary order. Categories with no
/// hit are omitted.
pub fn categorize_skills(text: &str, vocabulary: &Vocabulary) -> SkillGroups {
    let low = text.to_lowercase();
    vocabulary
        .categories()
        .iter()
        .filter_map(|category| {
            let hits: BTreeSet<String> = category
                .skills
                .iter()
                .filter(|s| low.contains(s.as_str()))
                .map(|s| title_case(s))
                .collect();
            (!hits.is_empty()).then(|| (category.name.clone(), hits.into_iter().collect()))
        })
        .collect()
}
