//! Axum route handlers for the screening API.

use axum::{
    extract::{multipart::MultipartError, Multipart, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{AtsResult, CandidateAnalysis, CandidateRecord, DocumentOutcome};
use crate::scoring::highlight_jd_keywords;
use crate::screening::batch::{analyze_batch, UploadedFile};
use crate::screening::export::summary_csv;
use crate::screening::ranking::{clamp_top_n, rank_candidates, shortlist};
use crate::screening::report::{CandidateReport, ChartRef};
use crate::state::AppState;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const CSV_DISPOSITION: &str = "attachment; filename=\"all_candidates.csv\"";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzeFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeQuery {
    #[serde(default)]
    pub format: AnalyzeFormat,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FailedDocument {
    pub file_name: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub top_n: usize,
    /// Every analyzed resume, highest ATS score first.
    pub candidates: Vec<CandidateAnalysis>,
    pub shortlist: Vec<CandidateAnalysis>,
    pub failures: Vec<FailedDocument>,
}

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub raw_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub jd_text: String,
}

#[derive(Debug, Deserialize)]
pub struct HighlightRequest {
    pub resume_text: String,
    #[serde(default)]
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct HighlightResponse {
    pub html: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub analysis: CandidateAnalysis,
    #[serde(default)]
    pub charts: Vec<ChartRef>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub format: ReportFormat,
}

/// Multipart form of the analyze endpoint, once read.
struct AnalyzeForm {
    uploads: Vec<UploadedFile>,
    jd_text: String,
    top_n: Option<usize>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart: `files` (repeated), `jd_text`, optional `top_n`.
/// Analyzes every resume, ranks them by ATS score and returns the shortlist.
/// Documents that cannot be read are listed under `failures`; the batch
/// still succeeds. `?format=csv` returns the ranked summary CSV instead.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = read_analyze_form(multipart, state.config.max_upload_bytes).await?;
    if form.uploads.is_empty() {
        return Err(AppError::Validation(
            "At least one resume must be uploaded in the 'files' field".to_string(),
        ));
    }
    let top_n = clamp_top_n(form.top_n.unwrap_or(state.config.shortlist_top_n));

    let outcomes = analyze_batch(
        &state.pipeline,
        form.uploads,
        &form.jd_text,
        state.config.batch_concurrency,
    )
    .await;

    let candidates = rank_candidates(&outcomes);
    let failures: Vec<FailedDocument> = outcomes
        .into_iter()
        .filter_map(|o| match o {
            DocumentOutcome::Failed { file_name, reason } => {
                Some(FailedDocument { file_name, reason })
            }
            DocumentOutcome::Analyzed(_) => None,
        })
        .collect();
    info!(
        "Analyzed {} resume(s), {} failed, shortlisting top {top_n}",
        candidates.len(),
        failures.len()
    );

    if let AnalyzeFormat::Csv = query.format {
        let csv = summary_csv(&candidates)?;
        return Ok((
            [
                (header::CONTENT_TYPE, CSV_CONTENT_TYPE),
                (header::CONTENT_DISPOSITION, CSV_DISPOSITION),
            ],
            csv,
        )
            .into_response());
    }

    let shortlist = shortlist(&candidates, top_n).to_vec();
    Ok(Json(AnalyzeResponse {
        analysis_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        top_n,
        candidates,
        shortlist,
        failures,
    })
    .into_response())
}

/// POST /api/v1/parse
///
/// Parses already-extracted resume text into a candidate record.
pub async fn handle_parse(
    State(state): State<AppState>,
    Json(request): Json<ParseRequest>,
) -> Json<CandidateRecord> {
    Json(state.pipeline.parser.parse(&request.raw_text))
}

/// POST /api/v1/score
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Json<AtsResult> {
    Json(
        state
            .pipeline
            .scorer
            .score(&request.skills, &request.keywords, &request.jd_text),
    )
}

/// POST /api/v1/highlight
pub async fn handle_highlight(Json(request): Json<HighlightRequest>) -> Json<HighlightResponse> {
    Json(HighlightResponse {
        html: highlight_jd_keywords(&request.resume_text, &request.jd_text),
    })
}

/// POST /api/v1/report
///
/// Builds the report model for one analysis. `?format=text` returns the
/// paginated plain-text rendering, pages separated by form feeds.
pub async fn handle_report(
    Query(query): Query<ReportQuery>,
    Json(request): Json<ReportRequest>,
) -> Response {
    let report = CandidateReport::build(&request.analysis, request.charts);
    match query.format {
        ReportFormat::Json => Json(report).into_response(),
        ReportFormat::Text => {
            ([(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)], report.render_text()).into_response()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart
// ────────────────────────────────────────────────────────────────────────────

async fn read_analyze_form(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm {
        uploads: Vec::new(),
        jd_text: String::new(),
        top_n: None,
    };

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "files" | "file" => {
                let file_name = field.file_name().unwrap_or("unknown").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;
                if data.len() > max_upload_bytes {
                    return Err(AppError::PayloadTooLarge(format!(
                        "'{file_name}' is {} bytes; the limit is {max_upload_bytes}",
                        data.len()
                    )));
                }
                form.uploads.push(UploadedFile::new(file_name, data).with_content_type(content_type));
            }
            "jd_text" => {
                form.jd_text = field.text().await.map_err(multipart_error)?;
            }
            "top_n" => {
                let raw = field.text().await.map_err(multipart_error)?;
                let top_n = raw.trim().parse::<usize>().map_err(|_| {
                    AppError::Validation(format!("top_n must be a whole number, got '{raw}'"))
                })?;
                form.top_n = Some(top_n);
            }
            _ => {
                field.bytes().await.map_err(multipart_error)?;
            }
        }
    }

    Ok(form)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Malformed multipart body: {}", e.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::extraction::docx::tests::build_docx;
    use crate::nlp::RuleBasedAnalyzer;
    use crate::parsing::{ResumeParser, Vocabulary};
    use crate::routes::build_router;
    use crate::scoring::KeywordAtsScorer;
    use crate::screening::batch::Pipeline;

    const BOUNDARY: &str = "screener-test-boundary";
    const BODY_LIMIT: usize = 1024 * 1024;

    fn app(config: Config) -> Router {
        let parser = ResumeParser::new(
            Arc::new(Vocabulary::builtin()),
            Arc::new(RuleBasedAnalyzer::new()),
        );
        build_router(AppState {
            config,
            pipeline: Pipeline::new(parser, Arc::new(KeywordAtsScorer)),
        })
    }

    fn multipart_body(texts: &[(&str, &str)], files: &[(&str, Vec<u8>)]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in texts {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        for (file_name, bytes) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn analyze_request(uri: &str, body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, payload: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    async fn read_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn read_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn two_resumes() -> Vec<(&'static str, Vec<u8>)> {
        vec![
            ("tom.docx", build_docx(&["TOM WEST", "Java engineer"])),
            (
                "jane.docx",
                build_docx(&["JANE DOE", "Python developer with Docker, 6 years"]),
            ),
        ]
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Config::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_ranks_and_shortlists() {
        let body = multipart_body(
            &[
                ("jd_text", "Python developer with Docker experience"),
                ("top_n", "1"),
            ],
            &two_resumes(),
        );
        let response = app(Config::default())
            .oneshot(analyze_request("/api/v1/analyze", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = read_json(response).await;
        assert_eq!(json["top_n"], 1);
        assert_eq!(json["candidates"].as_array().unwrap().len(), 2);
        assert_eq!(json["candidates"][0]["file_name"], "jane.docx");
        assert_eq!(json["candidates"][0]["record"]["Name"], "Jane Doe");
        assert_eq!(json["candidates"][1]["file_name"], "tom.docx");
        assert_eq!(json["shortlist"].as_array().unwrap().len(), 1);
        assert_eq!(json["shortlist"][0]["file_name"], "jane.docx");
        assert!(json["failures"].as_array().unwrap().is_empty());
        assert!(json["analysis_id"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_reports_unreadable_files_as_failures() {
        let mut files = two_resumes();
        files.push(("cover.rtf", b"{\\rtf1}".to_vec()));
        let body = multipart_body(&[("jd_text", "python")], &files);
        let response = app(Config::default())
            .oneshot(analyze_request("/api/v1/analyze", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = read_json(response).await;
        assert_eq!(json["candidates"].as_array().unwrap().len(), 2);
        assert_eq!(json["failures"][0]["file_name"], "cover.rtf");
        assert_eq!(json["top_n"], 3);
    }

    #[tokio::test]
    async fn test_analyze_csv_export() {
        let body = multipart_body(&[("jd_text", "python docker")], &two_resumes());
        let response = app(Config::default())
            .oneshot(analyze_request("/api/v1/analyze?format=csv", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], CSV_CONTENT_TYPE);

        let csv = read_text(response).await;
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "File,Name,Email,Phone,ExperienceYears,ATS_Score,Skills");
        assert!(lines[1].starts_with("jane.docx,Jane Doe,"));
        assert!(lines[2].starts_with("tom.docx,Tom West,"));
    }

    #[tokio::test]
    async fn test_analyze_without_files_is_rejected() {
        let body = multipart_body(&[("jd_text", "python")], &[]);
        let response = app(Config::default())
            .oneshot(analyze_request("/api/v1/analyze", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_rejects_bad_top_n() {
        let body = multipart_body(&[("top_n", "three")], &two_resumes());
        let response = app(Config::default())
            .oneshot(analyze_request("/api/v1/analyze", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let config = Config {
            max_upload_bytes: 16,
            ..Config::default()
        };
        let body = multipart_body(&[], &two_resumes());
        let response = app(config)
            .oneshot(analyze_request("/api/v1/analyze", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_parse_endpoint() {
        let response = app(Config::default())
            .oneshot(json_request(
                "/api/v1/parse",
                json!({ "raw_text": "JOHN SMITH\nSoftware Engineer\njohn@example.com" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["Name"], "John Smith");
        assert_eq!(json["Email"], "john@example.com");
    }

    #[tokio::test]
    async fn test_score_endpoint_clamps_to_100() {
        let response = app(Config::default())
            .oneshot(json_request(
                "/api/v1/score",
                json!({
                    "skills": ["Python", "Java"],
                    "keywords": ["developer", "experience"],
                    "jd_text": "Looking for a Python developer with AWS and Docker experience, 3+ years required."
                }),
            ))
            .await
            .unwrap();
        let json = read_json(response).await;
        assert_eq!(json["score"], 100.0);
        assert_eq!(json["skills_overlap"], 1);
        assert_eq!(json["keywords_overlap"], 2);
    }

    #[tokio::test]
    async fn test_highlight_endpoint() {
        let response = app(Config::default())
            .oneshot(json_request(
                "/api/v1/highlight",
                json!({ "resume_text": "Rust & Go\nRUST", "jd_text": "rust" }),
            ))
            .await
            .unwrap();
        let json = read_json(response).await;
        assert_eq!(json["html"], "<mark>Rust</mark> &amp; Go<br><mark>RUST</mark>");
    }

    #[tokio::test]
    async fn test_report_endpoint_json_and_text() {
        let parser = ResumeParser::new(
            Arc::new(Vocabulary::builtin()),
            Arc::new(RuleBasedAnalyzer::new()),
        );
        let analysis = Pipeline::new(parser, Arc::new(KeywordAtsScorer)).analyze_text(
            "jane.pdf".to_string(),
            "JANE DOE\njane@example.com\nPython, 5 years",
            "python",
        );
        let payload = json!({
            "analysis": analysis,
            "charts": [{ "name": "skills_pie", "uri": "https://cdn.example.com/p.png" }]
        });

        let response = app(Config::default())
            .oneshot(json_request("/api/v1/report", payload.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["title"], "Resume Screening Report");
        assert_eq!(json["sections"][0]["fields"][0]["value"], "Jane Doe");
        assert_eq!(json["images"][0]["name"], "skills_pie");

        let response = app(Config::default())
            .oneshot(json_request("/api/v1/report?format=text", payload))
            .await
            .unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], TEXT_CONTENT_TYPE);
        let text = read_text(response).await;
        assert!(text.starts_with("Resume Screening Report\n"));
        assert!(text.contains("Experience (years): 5.0"));
        assert!(text.contains("[image: https://cdn.example.com/p.png]"));
    }
}
