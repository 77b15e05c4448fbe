//! PDF extraction via the `pdf-extract` crate.
//!
//! This module is only available when the `pdf` feature is enabled.

use async_trait::async_trait;
use tracing::{debug, error};

use crate::{ExtractError, Result, TextExtractor, normalize_whitespace};

/// A [`TextExtractor`] that reads a PDF file from disk.
///
/// Extraction is CPU-bound, so it runs on the blocking thread pool.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_extract::{PdfExtractor, TextExtractor};
///
/// let extractor = PdfExtractor::new();
/// let text = extractor.extract("./factsheet.pdf").await?;
/// ```
#[derive(Debug, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    async fn extract(&self, source: &str) -> Result<String> {
        debug!(path = source, "extracting pdf text");

        let path = source.to_string();
        let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path))
            .await
            .map_err(|e| ExtractError::Fetch {
                source: source.to_string(),
                message: format!("extraction task failed: {e}"),
            })?;

        let text = extracted.map_err(|e| {
            error!(path = source, error = %e, "pdf parsing failed");
            ExtractError::Parse { source: source.to_string(), message: e.to_string() }
        })?;

        let text = normalize_whitespace(&text);
        if text.is_empty() {
            return Err(ExtractError::Empty { source: source.to_string() });
        }

        debug!(path = source, text_len = text.len(), "extracted pdf text");
        Ok(text)
    }
}
