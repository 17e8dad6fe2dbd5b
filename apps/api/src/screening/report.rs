//! Per-candidate report model.
//!
//! The report is data, not layout: labelled sections, chart series and
//! optional image references. A plain-text rendering with fixed-height pages
//! is provided for download and for tests; graphic rendering belongs to
//! whoever consumes the JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::CandidateAnalysis;
use crate::parsing::skills::title_case;

pub const REPORT_TITLE: &str = "Resume Screening Report";
pub const LINES_PER_PAGE: usize = 40;
/// Lines reserved for an embedded image, including its heading.
const IMAGE_BLOCK_LINES: usize = 12;
const MISSING: &str = "-";
const PAGE_BREAK: char = '\u{c}';

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportField {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub heading: String,
    pub fields: Vec<ReportField>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
}

/// A named, already-rendered chart image supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRef {
    /// Snake-case key such as `skills_pie`; shown title-cased.
    pub name: String,
    /// Where the image lives (URL, data URI, object key).
    pub uri: String,
}

impl ChartRef {
    pub fn title(&self) -> String {
        title_case(&self.name.replace('_', " "))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub file_name: String,
    pub sections: Vec<ReportSection>,
    pub charts: Vec<ChartSeries>,
    pub images: Vec<ChartRef>,
}

impl CandidateReport {
    /// Builds the report for one analysis. Image references with an empty
    /// `uri` are dropped.
    pub fn build(analysis: &CandidateAnalysis, images: Vec<ChartRef>) -> Self {
        let record = &analysis.record;
        let candidate = ReportSection {
            heading: "Candidate".to_string(),
            fields: vec![
                field("Name", or_missing(record.name.clone())),
                field("Email", or_missing(record.email.clone())),
                field("Phone", or_missing(record.phone.clone())),
                field(
                    "Experience (years)",
                    or_missing(record.experience_years.map(format_number)),
                ),
                field("Skills", joined(&record.skills, ", ")),
                field("Education", joined(&record.education, "; ")),
            ],
        };
        let ats = ReportSection {
            heading: "ATS Match".to_string(),
            fields: vec![
                field("Score (%)", format_number(analysis.ats.score)),
                field("Skills Overlap", analysis.ats.skills_overlap.to_string()),
                field("Keywords Overlap", analysis.ats.keywords_overlap.to_string()),
            ],
        };

        Self {
            title: REPORT_TITLE.to_string(),
            generated_at: Utc::now(),
            file_name: analysis.file_name.clone(),
            sections: vec![candidate, ats],
            charts: chart_series(analysis),
            images: images.into_iter().filter(|i| !i.uri.trim().is_empty()).collect(),
        }
    }

    /// Plain-text pages of at most `lines_per_page` lines (minimum 1).
    ///
    /// A field line never splits across pages. An image block starts a new
    /// page when fewer than its reserved lines remain, mirroring how a
    /// printed report keeps a picture with its caption.
    pub fn render_pages(&self, lines_per_page: usize) -> Vec<String> {
        let mut pages = Paginator::new(lines_per_page.max(1));
        pages.push(&self.title);
        pages.push("");

        for section in &self.sections {
            pages.push(&section.heading);
            for f in &section.fields {
                pages.push(&format!("{}: {}", f.label, f.value));
            }
            pages.push("");
        }

        for image in &self.images {
            pages.reserve(IMAGE_BLOCK_LINES);
            pages.push(&image.title());
            pages.push(&format!("[image: {}]", image.uri));
            pages.push("");
        }

        pages.finish()
    }

    /// All pages joined with form feeds.
    pub fn render_text(&self) -> String {
        self.render_pages(LINES_PER_PAGE)
            .join(&PAGE_BREAK.to_string())
    }
}

struct Paginator {
    limit: usize,
    pages: Vec<Vec<String>>,
}

impl Paginator {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            pages: vec![Vec::new()],
        }
    }

    fn current(&mut self) -> &mut Vec<String> {
        if self.pages.last().map_or(true, |p| p.len() >= self.limit) {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn push(&mut self, line: &str) {
        self.current().push(line.to_string());
    }

    /// Starts a new page unless `lines` still fit on the current one.
    fn reserve(&mut self, lines: usize) {
        let room = self.limit - self.pages.last().map_or(0, Vec::len);
        let on_fresh_page = self.pages.last().map_or(true, Vec::is_empty);
        if room < lines.min(self.limit) && !on_fresh_page {
            self.pages.push(Vec::new());
        }
    }

    fn finish(self) -> Vec<String> {
        self.pages
            .into_iter()
            .filter(|p| !p.is_empty())
            .map(|p| p.join("\n"))
            .collect()
    }
}

fn field(label: &str, value: String) -> ReportField {
    ReportField {
        label: label.to_string(),
        value,
    }
}

fn or_missing(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| MISSING.to_string())
}

fn joined(items: &[String], sep: &str) -> String {
    if items.is_empty() {
        MISSING.to_string()
    } else {
        items.join(sep)
    }
}

/// Whole numbers keep one decimal ("5.0"); others print as-is ("57.14").
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Skills share (one equal slice per skill) and, when known, an experience bar.
fn chart_series(analysis: &CandidateAnalysis) -> Vec<ChartSeries> {
    let record = &analysis.record;
    let mut charts = Vec::new();
    if !record.skills.is_empty() {
        charts.push(ChartSeries {
            name: "skills_share".to_string(),
            kind: ChartKind::Pie,
            points: record
                .skills
                .iter()
                .map(|s| ChartPoint {
                    label: s.clone(),
                    value: 1.0,
                })
                .collect(),
        });
    }
    if let Some(years) = record.experience_years {
        charts.push(ChartSeries {
            name: "experience".to_string(),
            kind: ChartKind::Bar,
            points: vec![ChartPoint {
                label: "Experience (years)".to_string(),
                value: years,
            }],
        });
    }
    charts
}
