pub mod candidate;

pub use candidate::{AtsResult, CandidateAnalysis, CandidateRecord, DocumentOutcome, SkillGroups};
