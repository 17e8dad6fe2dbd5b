use anyhow::{Context, Result};

use crate::models::CandidateAnalysis;
use crate::screening::report::format_number;

pub const CSV_HEADER: [&str; 7] = [
    "File",
    "Name",
    "Email",
    "Phone",
    "ExperienceYears",
    "ATS_Score",
    "Skills",
];

/// Summary CSV, one row per candidate in the order given (normally ranked).
/// Absent fields are empty cells.
pub fn summary_csv(candidates: &[CandidateAnalysis]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for c in candidates {
        let record = &c.record;
        let experience = record
            .experience_years
            .map(format_number)
            .unwrap_or_default();
        let score = format_number(c.ats.score);
        let skills = record.skills.join(", ");
        writer.write_record([
            c.file_name.as_str(),
            record.name.as_deref().unwrap_or_default(),
            record.email.as_deref().unwrap_or_default(),
            record.phone.as_deref().unwrap_or_default(),
            experience.as_str(),
            score.as_str(),
            skills.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .context("Failed to flush summary CSV")?;
    String::from_utf8(bytes).context("Summary CSV is not valid UTF-8")
}
