//! Field extraction and resume assembly.
//!
//! Each extractor is an independent, total function over normalized text.
//! `ResumeParser` normalizes once and runs them all against the shared text.

pub mod contact;
pub mod education;
pub mod experience;
pub mod keywords;
pub mod name;
pub mod parser;
pub mod skills;
pub mod vocabulary;

pub use parser::ResumeParser;
pub use vocabulary::Vocabulary;
