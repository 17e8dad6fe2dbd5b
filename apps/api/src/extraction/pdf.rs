use std::panic;

use tracing::debug;

use crate::errors::ExtractError;

/// Concatenates the text of every page, in document order.
///
/// Works from memory, so no temporary file is involved. `pdf-extract` panics on
/// some malformed inputs; a panic is reported as a corrupt document rather
/// than taking the worker down.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    if !bytes.starts_with(b"%PDF") {
        return Err(ExtractError::CorruptDocument(
            "missing %PDF header".to_string(),
        ));
    }

    let text = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| ExtractError::CorruptDocument("PDF decoder aborted".to_string()))?
        .map_err(|e| ExtractError::CorruptDocument(format!("PDF decode failed: {e}")))?;

    debug!("Extracted {} chars from PDF", text.len());
    Ok(text)
}
