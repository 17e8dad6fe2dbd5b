//! Batch pipeline: many uploads in, one `DocumentOutcome` per upload out.
//!
//! Each document runs extract → parse → score → highlight on a blocking
//! worker. Documents share nothing mutable; a failure is recorded against
//! its own file name and never aborts the rest of the batch.

use std::sync::Arc;

use bytes::Bytes;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};

use crate::errors::ExtractError;
use crate::extraction::{extract, RawDocument};
use crate::models::{CandidateAnalysis, DocumentOutcome};
use crate::parsing::ResumeParser;
use crate::scoring::{highlight_jd_keywords, AtsScorer};

const UNFINISHED_REASON: &str = "Analysis did not complete";

/// One file as received from the client, before format detection.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    /// MIME type declared by the client, used when the extension is missing.
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: Option<String>) -> Self {
        self.content_type = content_type;
        self
    }
}

/// The read-only collaborators every analysis needs. Cheap to clone.
#[derive(Clone)]
pub struct Pipeline {
    pub parser: ResumeParser,
    pub scorer: Arc<dyn AtsScorer>,
}

impl Pipeline {
    pub fn new(parser: ResumeParser, scorer: Arc<dyn AtsScorer>) -> Self {
        Self { parser, scorer }
    }

    /// Full single-document pipeline. Only format detection and decoding
    /// can fail; missing fields are normal.
    pub fn analyze_document(
        &self,
        upload: &UploadedFile,
        jd_text: &str,
    ) -> Result<CandidateAnalysis, ExtractError> {
        let document = RawDocument::from_upload(
            upload.file_name.clone(),
            upload.content_type.as_deref(),
            upload.bytes.clone(),
        )?;
        let text = extract(&document.bytes, document.format)?;
        Ok(self.analyze_text(document.file_name, &text, jd_text))
    }

    /// Parse, score and highlight already-extracted text.
    pub fn analyze_text(&self, file_name: String, raw_text: &str, jd_text: &str) -> CandidateAnalysis {
        let record = self.parser.parse(raw_text);
        let ats = self.scorer.score(&record.skills, &record.keywords, jd_text);
        let highlighted_html = highlight_jd_keywords(&record.raw_text, jd_text);

        debug!(
            "Scored {file_name} via {}: {:.2} ({} skills, {} keywords overlap)",
            self.scorer.backend_id(),
            ats.score,
            ats.skills_overlap,
            ats.keywords_overlap
        );

        CandidateAnalysis {
            file_name,
            record,
            ats,
            highlighted_html,
        }
    }
}

type Joined = Result<(usize, String, Result<CandidateAnalysis, ExtractError>), JoinError>;

/// Analyzes every upload with at most `concurrency` documents in flight.
///
/// The returned outcomes are in upload order regardless of completion order.
/// A `concurrency` of zero is treated as one.
pub async fn analyze_batch(
    pipeline: &Pipeline,
    uploads: Vec<UploadedFile>,
    jd_text: &str,
    concurrency: usize,
) -> Vec<DocumentOutcome> {
    let limit = concurrency.max(1);
    let jd: Arc<str> = Arc::from(jd_text);
    info!(
        "Analyzing batch of {} resume(s), concurrency {limit}",
        uploads.len()
    );

    let mut outcomes: Vec<DocumentOutcome> = uploads
        .iter()
        .map(|u| DocumentOutcome::Failed {
            file_name: u.file_name.clone(),
            reason: UNFINISHED_REASON.to_string(),
        })
        .collect();

    let mut tasks = JoinSet::new();
    for (idx, upload) in uploads.into_iter().enumerate() {
        if tasks.len() >= limit {
            if let Some(joined) = tasks.join_next().await {
                record_outcome(&mut outcomes, joined);
            }
        }
        let pipeline = pipeline.clone();
        let jd = Arc::clone(&jd);
        tasks.spawn_blocking(move || {
            let result = pipeline.analyze_document(&upload, &jd);
            (idx, upload.file_name, result)
        });
    }
    while let Some(joined) = tasks.join_next().await {
        record_outcome(&mut outcomes, joined);
    }

    outcomes
}

fn record_outcome(outcomes: &mut [DocumentOutcome], joined: Joined) {
    match joined {
        Ok((idx, _, Ok(analysis))) => {
            outcomes[idx] = DocumentOutcome::Analyzed(Box::new(analysis));
            debug!("Finished {}", outcomes[idx].file_name());
        }
        Ok((idx, file_name, Err(e))) => {
            warn!("Skipping {file_name}: {e}");
            outcomes[idx] = DocumentOutcome::Failed {
                file_name,
                reason: e.to_string(),
            };
        }
        // The slot keeps its placeholder failure.
        Err(e) => error!("Resume analysis task failed: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::docx::tests::build_docx;
    use crate::extraction::pdf::tests::build_pdf;
    use crate::nlp::RuleBasedAnalyzer;
    use crate::parsing::Vocabulary;
    use crate::scoring::KeywordAtsScorer;

    fn pipeline() -> Pipeline {
        let parser = ResumeParser::new(
            Arc::new(Vocabulary::builtin()),
            Arc::new(RuleBasedAnalyzer::new()),
        );
        Pipeline::new(parser, Arc::new(KeywordAtsScorer))
    }

    fn docx_upload(file_name: &str, paragraphs: &[&str]) -> UploadedFile {
        UploadedFile::new(file_name, build_docx(paragraphs))
    }

    #[tokio::test]
    async fn test_outcomes_keep_upload_order_and_isolate_failures() {
        let uploads = vec![
            docx_upload("jane.docx", &["JANE DOE", "jane@example.com", "Python developer, 4 years"]),
            UploadedFile::new("notes.rtf", b"{\\rtf1 hello}".to_vec()),
            UploadedFile::new("broken.pdf", b"definitely not a pdf".to_vec()),
            docx_upload("tom.DOCX", &["TOM WEST", "Java and Docker, 7+ years"]),
            UploadedFile::new(
                "ana.pdf",
                build_pdf(&[&["Rust engineer"], &["Kubernetes operator"]]),
            ),
        ];

        let outcomes = analyze_batch(&pipeline(), uploads, "python developer", 2).await;

        let names: Vec<&str> = outcomes.iter().map(|o| o.file_name()).collect();
        assert_eq!(
            names,
            vec!["jane.docx", "notes.rtf", "broken.pdf", "tom.DOCX", "ana.pdf"]
        );

        match &outcomes[0] {
            DocumentOutcome::Analyzed(a) => {
                assert_eq!(a.record.name.as_deref(), Some("Jane Doe"));
                assert_eq!(a.record.experience_years, Some(4.0));
                assert!(a.ats.skills_overlap >= 1);
                assert!(a.highlighted_html.contains("<mark>Python</mark>"));
            }
            other => panic!("expected analysis, got {other:?}"),
        }
        match &outcomes[1] {
            DocumentOutcome::Failed { reason, .. } => {
                assert!(reason.starts_with("Unsupported document format"))
            }
            other => panic!("expected failure, got {other:?}"),
        }
        match &outcomes[2] {
            DocumentOutcome::Failed { reason, .. } => assert!(reason.starts_with("Corrupt document")),
            other => panic!("expected failure, got {other:?}"),
        }
        match &outcomes[3] {
            DocumentOutcome::Analyzed(a) => {
                assert_eq!(a.record.name.as_deref(), Some("Tom West"));
                assert_eq!(a.record.experience_years, Some(7.0));
            }
            other => panic!("expected analysis, got {other:?}"),
        }
        match &outcomes[4] {
            DocumentOutcome::Analyzed(a) => {
                let rust = a.record.raw_text.find("Rust").expect("page one text");
                let k8s = a.record.raw_text.find("Kubernetes").expect("page two text");
                assert!(rust < k8s);
                assert!(a.record.skills.contains(&"Kubernetes".to_string()));
            }
            other => panic!("expected analysis, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_processes_everything() {
        let uploads: Vec<UploadedFile> = (0..5)
            .map(|i| docx_upload(&format!("r{i}.docx"), &["Rust and Linux"]))
            .collect();
        let outcomes = analyze_batch(&pipeline(), uploads, "", 0).await;
        assert_eq!(outcomes.len(), 5);
        assert!(outcomes
            .iter()
            .all(|o| matches!(o, DocumentOutcome::Analyzed(_))));
        assert_eq!(outcomes[4].file_name(), "r4.docx");
    }

    #[tokio::test]
    async fn test_empty_batch_yields_no_outcomes() {
        assert!(analyze_batch(&pipeline(), vec![], "rust", 4).await.is_empty());
    }

    #[test]
    fn test_empty_jd_scores_zero_and_skips_highlighting() {
        let analysis = pipeline().analyze_text(
            "pasted.txt".to_string(),
            "JANE DOE\nPython <dev>",
            "",
        );
        assert_eq!(analysis.ats.score, 0.0);
        assert_eq!(analysis.ats.skills_overlap, 0);
        assert_eq!(analysis.highlighted_html, "JANE DOE<br>Python <dev>");
    }
}
