//! Resume-to-job-description matching: the ATS score and display highlights.

pub mod ats;
pub mod highlight;

pub use ats::{AtsScorer, KeywordAtsScorer};
pub use highlight::highlight_jd_keywords;
