//! Text extraction: uploaded document bytes in, plain text out.
//!
//! Two format adapters (`pdf`, `docx`) sit behind the single `extract` entry
//! point. `normalize` produces the canonical line form every field extractor
//! consumes.

pub mod docx;
pub mod normalize;
pub mod pdf;

use std::path::Path;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::ExtractError;

pub use normalize::{normalize, NormalizedText};

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Declared format of an uploaded resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// Portable document (PDF).
    Pdf,
    /// Structured word-processing document (DOCX).
    Docx,
}

impl DocumentFormat {
    /// Derives the format tag from an uploaded file name's extension.
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractError> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                ExtractError::UnsupportedFormat(format!("'{file_name}' has no file extension"))
            })?;
        ext.parse()
    }
}

impl FromStr for DocumentFormat {
    type Err = ExtractError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let lower = tag.trim().to_ascii_lowercase();
        match lower.as_str() {
            "pdf" | PDF_MIME => Ok(DocumentFormat::Pdf),
            "docx" | DOCX_MIME => Ok(DocumentFormat::Docx),
            _ => Err(ExtractError::UnsupportedFormat(tag.to_string())),
        }
    }
}

/// An uploaded document awaiting extraction. Dropped once its text is out.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub file_name: String,
    pub format: DocumentFormat,
    pub bytes: Bytes,
}

impl RawDocument {
    /// Builds a document whose format is inferred from `file_name`, falling
    /// back to the declared MIME type when the extension says nothing useful.
    pub fn from_upload(
        file_name: impl Into<String>,
        content_type: Option<&str>,
        bytes: Bytes,
    ) -> Result<Self, ExtractError> {
        let file_name = file_name.into();
        let format = match DocumentFormat::from_file_name(&file_name) {
            Ok(format) => format,
            Err(by_name) => content_type
                .and_then(|ct| ct.split(';').next())
                .and_then(|mime| mime.parse().ok())
                .ok_or(by_name)?,
        };
        Ok(Self {
            file_name,
            format,
            bytes,
        })
    }
}

/// Extracts plain text from raw bytes according to the declared format.
pub fn extract(bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractError> {
    match format {
        DocumentFormat::Pdf => pdf::extract_pdf_text(bytes),
        DocumentFormat::Docx => docx::extract_docx_text(bytes),
    }
}
