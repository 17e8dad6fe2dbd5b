use std::fmt;
use std::ops::Index;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Structured fields parsed out of one resume. Immutable once assembled.
///
/// Serialized with the PascalCase keys the dashboard and report collaborators
/// consume (`Name`, `Email`, `SkillCategories`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CandidateRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Title-cased master-vocabulary hits, sorted.
    pub skills: Vec<String>,
    pub skill_categories: SkillGroups,
    pub education: Vec<String>,
    pub experience_years: Option<f64>,
    /// Up to 120 lower-cased noun lemmas, first-occurrence order.
    pub keywords: Vec<String>,
    pub raw_text: String,
}

/// Skill hits keyed by category, in vocabulary declaration order.
///
/// Serialized as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillGroups(Vec<(String, Vec<String>)>);

impl SkillGroups {
    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, skills)| skills.as_slice())
    }

    pub fn contains_key(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for SkillGroups {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut groups = SkillGroups::default();
        for (name, skills) in iter {
            // A repeated category keeps its first position; hits are merged.
            match groups.0.iter_mut().find(|(n, _)| *n == name) {
                Some((_, existing)) => {
                    existing.extend(skills);
                    existing.sort();
                    existing.dedup();
                }
                None => groups.0.push((name, skills)),
            }
        }
        groups
    }
}

impl Index<&str> for SkillGroups {
    type Output = [String];

    fn index(&self, category: &str) -> &[String] {
        self.get(category)
            .unwrap_or_else(|| panic!("no skill category named '{category}'"))
    }
}

impl Serialize for SkillGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, skills)| (name, skills)))
    }
}

impl<'de> Deserialize<'de> for SkillGroups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = SkillGroups;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category name to skill list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SkillGroups, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Vec<String>>()? {
                    entries.push(entry);
                }
                Ok(entries.into_iter().collect())
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

/// Resume-to-job-description match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AtsResult {
    /// 0.0 - 100.0, two decimal places.
    pub score: f64,
    pub skills_overlap: usize,
    pub keywords_overlap: usize,
}

/// Everything the pipeline produces for one uploaded resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateAnalysis {
    pub file_name: String,
    pub record: CandidateRecord,
    pub ats: AtsResult,
    pub highlighted_html: String,
}

/// Per-document batch result. A failed document never aborts its siblings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    Analyzed(Box<CandidateAnalysis>),
    Failed { file_name: String, reason: String },
}

impl DocumentOutcome {
    pub fn file_name(&self) -> &str {
        match self {
            DocumentOutcome::Analyzed(analysis) => &analysis.file_name,
            DocumentOutcome::Failed { file_name, .. } => file_name,
        }
    }
}
