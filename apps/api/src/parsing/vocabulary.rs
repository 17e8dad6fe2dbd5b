//! Fixed matching vocabularies: categorized skills and degree keywords.
//!
//! Loaded once at startup (built-in, or from `VOCABULARY_PATH`) and shared
//! read-only through `Arc<Vocabulary>`. Extractors take `&Vocabulary`, so
//! tests can hand them a small custom one.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const BUILTIN_SKILL_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Languages",
        &["c", "c++", "python", "java", "javascript", "typescript", "go", "php", "ruby"],
    ),
    (
        "Frameworks",
        &["flask", "django", "fastapi", "spring", "react", "angular", "vue", "express"],
    ),
    (
        "Databases",
        &["mysql", "postgresql", "sqlite", "mongodb", "redis"],
    ),
    (
        "ML/AI",
        &[
            "numpy",
            "pandas",
            "matplotlib",
            "scikit-learn",
            "tensorflow",
            "pytorch",
            "spacy",
            "transformers",
            "opencv",
            "nlp",
        ],
    ),
    (
        "Cloud/DevOps",
        &[
            "aws", "gcp", "azure", "docker", "kubernetes", "linux", "git", "github", "gitlab",
            "ci", "cd",
        ],
    ),
];

const BUILTIN_DEGREE_KEYWORDS: &[&str] = &[
    "b.tech", "btech", "b.e", "be", "bsc", "b.sc", "bca", "bachelor", "m.tech", "mtech", "m.e",
    "me", "msc", "m.sc", "mca", "master", "mba", "phd",
];

/// One named group of skill terms, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

/// On-disk shape of a vocabulary override file.
#[derive(Debug, Deserialize)]
struct VocabularyFile {
    skill_categories: Vec<SkillCategory>,
    degree_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    categories: Vec<SkillCategory>,
    skills: Vec<String>,
    degree_keywords: Vec<String>,
}

impl Vocabulary {
    /// Terms are lower-cased and trimmed; blanks are dropped. A skill declared
    /// in more than one category stays only in the first.
    pub fn new(categories: Vec<SkillCategory>, degree_keywords: Vec<String>) -> Self {
        let mut seen = HashSet::new();
        let categories: Vec<SkillCategory> = categories
            .into_iter()
            .map(|cat| SkillCategory {
                name: cat.name,
                skills: cat
                    .skills
                    .iter()
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty() && seen.insert(s.clone()))
                    .collect(),
            })
            .collect();

        let mut skills: Vec<String> = categories
            .iter()
            .flat_map(|c| c.skills.iter().cloned())
            .collect();
        skills.sort();

        let mut seen_degrees = HashSet::new();
        let degree_keywords = degree_keywords
            .iter()
            .map(|d| d.trim().to_lowercase())
            .filter(|d| !d.is_empty() && seen_degrees.insert(d.clone()))
            .collect();

        Self {
            categories,
            skills,
            degree_keywords,
        }
    }

    /// The vocabulary compiled into the binary.
    pub fn builtin() -> Self {
        let categories = BUILTIN_SKILL_CATEGORIES
            .iter()
            .map(|(name, skills)| SkillCategory {
                name: name.to_string(),
                skills: skills.iter().map(|s| s.to_string()).collect(),
            })
            .collect();
        let degrees = BUILTIN_DEGREE_KEYWORDS.iter().map(|d| d.to_string()).collect();
        Self::new(categories, degrees)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: VocabularyFile =
            serde_json::from_str(json).context("Vocabulary JSON does not match the expected shape")?;
        Ok(Self::new(file.skill_categories, file.degree_keywords))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary file '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    /// Master skill vocabulary: every category's terms, lower-case, sorted.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn degree_keywords(&self) -> &[String] {
        &self.degree_keywords
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_master_list_is_sorted_and_unique() {
        let vocab = Vocabulary::builtin();
        let skills = vocab.skills();
        assert!(skills.windows(2).all(|w| w[0] < w[1]));
        assert!(skills.contains(&"scikit-learn".to_string()));
        assert_eq!(skills.len(), 43);
    }

    #[test]
    fn test_builtin_categories_keep_declaration_order() {
        let vocab = Vocabulary::builtin();
        let names: Vec<_> = vocab.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Languages", "Frameworks", "Databases", "ML/AI", "Cloud/DevOps"]
        );
    }

    #[test]
    fn test_duplicate_skill_stays_in_first_category() {
        let vocab = Vocabulary::new(
            vec![
                SkillCategory {
                    name: "Data".to_string(),
                    skills: vec!["SQL".to_string(), "pandas".to_string()],
                },
                SkillCategory {
                    name: "Backend".to_string(),
                    skills: vec!["sql ".to_string(), "rust".to_string(), "".to_string()],
                },
            ],
            vec!["PhD".to_string()],
        );
        assert_eq!(vocab.categories()[0].skills, vec!["sql", "pandas"]);
        assert_eq!(vocab.categories()[1].skills, vec!["rust"]);
        assert_eq!(vocab.skills(), ["pandas", "rust", "sql"]);
        assert_eq!(vocab.degree_keywords(), ["phd"]);
    }

    #[test]
    fn test_from_json_str() {
        let vocab = Vocabulary::from_json_str(
            r#"{"skill_categories": [{"name": "Systems", "skills": ["Rust", "Zig"]}],
                "degree_keywords": ["bsc", "msc"]}"#,
        )
        .unwrap();
        assert_eq!(vocab.skills(), ["rust", "zig"]);
        assert_eq!(vocab.degree_keywords().len(), 2);
    }

    #[test]
    fn test_from_json_str_rejects_wrong_shape() {
        assert!(Vocabulary::from_json_str(r#"{"skills": ["rust"]}"#).is_err());
    }
}
