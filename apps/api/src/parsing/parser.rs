use std::sync::Arc;

use tracing::debug;

use crate::extraction::normalize;
use crate::models::CandidateRecord;
use crate::nlp::TextAnalyzer;
use crate::parsing::contact::extract_contact_info;
use crate::parsing::education::extract_education;
use crate::parsing::experience::extract_experience_years;
use crate::parsing::keywords::extract_resume_keywords;
use crate::parsing::name::extract_name;
use crate::parsing::skills::{categorize_skills, extract_skills};
use crate::parsing::vocabulary::Vocabulary;

/// Turns raw resume text into a `CandidateRecord`.
///
/// Cheap to clone; holds the shared vocabulary and text-analysis provider.
/// Deterministic for identical text, vocabulary and provider.
#[derive(Clone)]
pub struct ResumeParser {
    vocabulary: Arc<Vocabulary>,
    analyzer: Arc<dyn TextAnalyzer>,
}

impl ResumeParser {
    pub fn new(vocabulary: Arc<Vocabulary>, analyzer: Arc<dyn TextAnalyzer>) -> Self {
        Self {
            vocabulary,
            analyzer,
        }
    }

    pub fn parse(&self, raw_text: &str) -> CandidateRecord {
        let cleaned = normalize(raw_text);
        let text = cleaned.as_str();
        let vocab = self.vocabulary.as_ref();
        let analyzer = self.analyzer.as_ref();

        let contact = extract_contact_info(text);
        let record = CandidateRecord {
            name: extract_name(&cleaned, vocab, analyzer),
            email: contact.email,
            phone: contact.phone,
            skills: extract_skills(text, vocab),
            skill_categories: categorize_skills(text, vocab),
            education: extract_education(text, vocab),
            experience_years: extract_experience_years(text),
            keywords: extract_resume_keywords(text, analyzer),
            raw_text: cleaned.into_string(),
        };

        debug!(
            "Parsed resume via {}: {} skills, {} keywords, name found: {}",
            analyzer.backend_id(),
            record.skills.len(),
            record.keywords.len(),
            record.name.is_some()
        );
        record
    }
}
