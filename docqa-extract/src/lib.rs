//! # docqa-extract
//!
//! Plain-text extraction from source documents for grounded document QA.
//!
//! ## Overview
//!
//! The QA pipeline consumes extraction as an external collaborator: raw
//! document in, plain text out. This crate provides the [`TextExtractor`]
//! seam and two implementations:
//!
//! - [`HtmlExtractor`] — fetches a web page and strips it to text
//!   (feature `html`)
//! - [`PdfExtractor`] — extracts text from a PDF file (feature `pdf`)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docqa_extract::{HtmlExtractor, PdfExtractor, TextExtractor};
//!
//! let page = HtmlExtractor::new().extract("https://example.com/retirement").await?;
//! let sheet = PdfExtractor::new().extract("./factsheet.pdf").await?;
//! ```

use async_trait::async_trait;
use thiserror::Error;

#[cfg(feature = "html")]
pub mod html;
#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "html")]
pub use html::HtmlExtractor;
#[cfg(feature = "pdf")]
pub use pdf::PdfExtractor;

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The source could not be fetched or read.
    #[error("Failed to read '{source}': {message}")]
    Fetch {
        /// The source being extracted.
        source: String,
        /// A description of the failure.
        message: String,
    },

    /// The source was read but could not be parsed.
    #[error("Failed to parse '{source}': {message}")]
    Parse {
        /// The source being extracted.
        source: String,
        /// A description of the failure.
        message: String,
    },

    /// Extraction succeeded but produced no text.
    #[error("No text extracted from '{source}'")]
    Empty {
        /// The source being extracted.
        source: String,
    },
}

/// A convenience result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Converts a source document into plain text.
///
/// `source` is implementation-defined: a URL for [`HtmlExtractor`], a file
/// path for [`PdfExtractor`]. The returned text is whitespace-normalized
/// and ready for chunking.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract plain text from the given source.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Fetch`] when the source cannot be read,
    /// [`ExtractError::Parse`] when it cannot be interpreted, and
    /// [`ExtractError::Empty`] when no text comes out.
    async fn extract(&self, source: &str) -> Result<String>;
}

/// Collapse runs of whitespace while preserving paragraph structure:
/// lines are trimmed and internally collapsed to single spaces, and runs
/// of blank lines become one paragraph break.
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0usize;

    for line in text.lines() {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() {
            blank_run += 1;
            continue;
        }
        if !out.is_empty() {
            if blank_run > 0 {
                out.push_str("\n\n");
            } else {
                out.push('\n');
            }
        }
        out.push_str(&line);
        blank_run = 0;
    }

    out
}
