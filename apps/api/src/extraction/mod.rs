//! Document text extraction. Turns an uploaded document into the summary text
//! the review prompt is built from.
//!
//! Parsing is CPU-bound and synchronous; handlers run it on the blocking pool.

use crate::errors::AppError;

/// Extracts leading plain text from raw document bytes.
/// Carried in `AppState` as `Arc<dyn DocumentExtractor>`.
pub trait DocumentExtractor: Send + Sync {
    /// Returns at most `max_chars` leading characters of the document's text.
    fn extract_text(&self, bytes: &[u8], max_chars: usize) -> Result<String, AppError>;
}

/// PDF extractor using the pdf-extract crate.
/// Handles digital PDFs with embedded text layers; scanned PDFs yield no text.
pub struct PdfTextExtractor;

impl DocumentExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8], max_chars: usize) -> Result<String, AppError> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Extraction(format!("PDF parsing failed: {e}")))?;

        leading_text(&text, max_chars).ok_or_else(|| {
            AppError::Extraction("Document contains no extractable text".to_string())
        })
    }
}

/// Trims `text` and keeps its first `max_chars` characters.
/// Returns `None` when nothing but whitespace remains.
pub fn leading_text(text: &str, max_chars: usize) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(max_chars).collect())
}
