//! Document chunking strategies.
//!
//! This module provides the [`Chunker`] trait and two implementations:
//!
//! - [`SeparatorChunker`] — breaks at the highest-priority separator
//!   (paragraph break, line break, space) that fits the size limit
//! - [`FixedSizeChunker`] — splits by character count with configurable overlap
//!
//! Both validate their parameters at construction: `chunk_size` must be
//! greater than zero and `chunk_overlap` strictly smaller than `chunk_size`.

use crate::document::{Chunk, Document, META_CHUNK_INDEX, META_OFFSET};
use crate::error::{RagError, Result};

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s with text and metadata but no
/// embeddings; embeddings are attached later by the ingestion pipeline.
/// Chunking is a pure function of the document text: the same input always
/// yields the same chunks.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks.
    ///
    /// Returns an empty `Vec` if the document has empty text. No returned
    /// chunk is empty, every chunk is at most `chunk_size` long, and
    /// consecutive chunks overlap by the configured amount (the final chunk
    /// may be shorter). Chunks cover the full source text with no gaps.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Separator preference order: paragraph break, line break, word break.
/// A hard character cut is the implicit last resort.
const SEPARATORS: [&str; 3] = ["\n\n", "\n", " "];

fn validate_params(chunk_size: usize, chunk_overlap: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(RagError::ConfigError("chunk_size must be greater than zero".to_string()));
    }
    if chunk_overlap >= chunk_size {
        return Err(RagError::ConfigError(format!(
            "chunk_overlap ({chunk_overlap}) must be less than chunk_size ({chunk_size})"
        )));
    }
    Ok(())
}

/// Smallest char boundary at or after `i` (clamped to the text length).
fn next_boundary(text: &str, mut i: usize) -> usize {
    while i < text.len() && !text.is_char_boundary(i) {
        i += 1;
    }
    i.min(text.len())
}

/// Build a chunk at `offset` carrying the parent's metadata plus the
/// `chunk_index` and `offset` fields.
fn make_chunk(document: &Document, index: usize, offset: usize, text: &str) -> Chunk {
    let mut metadata = document.metadata.clone();
    metadata.insert(META_CHUNK_INDEX.to_string(), index.to_string());
    metadata.insert(META_OFFSET.to_string(), offset.to_string());

    Chunk {
        id: format!("{}_{index}", document.id),
        text: text.to_string(),
        embedding: Vec::new(),
        metadata,
        document_id: document.id.clone(),
    }
}

/// Breaks at the highest-priority separator that keeps a chunk within the
/// size limit.
///
/// The cut preference is paragraph break (`\n\n`), then line break, then
/// space; a hard character cut is used only when no separator occurs inside
/// the window. Separators stay attached to the preceding chunk so that the
/// chunks cover the source text exactly. Consecutive chunks share
/// `chunk_overlap` characters (snapped to UTF-8 boundaries).
///
/// # Example
///
/// ```rust,ignore
/// use docqa_rag::SeparatorChunker;
///
/// let chunker = SeparatorChunker::new(500, 50)?;
/// let chunks = chunker.chunk(&document);
/// ```
#[derive(Debug, Clone)]
pub struct SeparatorChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl SeparatorChunker {
    /// Create a new `SeparatorChunker`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if `chunk_size` is zero or
    /// `chunk_overlap >= chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        validate_params(chunk_size, chunk_overlap)?;
        Ok(Self { chunk_size, chunk_overlap })
    }

    /// Find the end of the chunk starting at `start`: the position after the
    /// last fitting separator, or a hard cut at the window edge.
    fn cut_point(&self, text: &str, start: usize) -> usize {
        if text.len() - start <= self.chunk_size {
            return text.len();
        }

        // Largest window end on a char boundary within the size limit.
        let mut window_end = start + self.chunk_size;
        while !text.is_char_boundary(window_end) {
            window_end -= 1;
        }
        if window_end <= start {
            // chunk_size is narrower than the next code point; emit it whole.
            return next_boundary(text, start + 1);
        }

        let window = &text[start..window_end];
        for sep in SEPARATORS {
            // pos > 0 so a chunk is never just the separator itself.
            if let Some(pos) = window.rfind(sep) {
                if pos > 0 {
                    return start + pos + sep.len();
                }
            }
        }

        window_end
    }
}

impl Chunker for SeparatorChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        let text = &document.text;
        if text.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut start = 0;
        let mut index = 0;

        loop {
            let end = self.cut_point(text, start);
            chunks.push(make_chunk(document, index, start, &text[start..end]));
            index += 1;

            if end >= text.len() {
                break;
            }

            // Step back by the overlap, snapping forward to a char boundary.
            let mut next = end.saturating_sub(self.chunk_overlap);
            while next < end && !text.is_char_boundary(next) {
                next += 1;
            }
            // Guarantee forward progress when an early separator cut left a
            // chunk shorter than the overlap.
            if next <= start {
                next = end;
            }
            start = next;
        }

        chunks
    }
}

/// Splits text into fixed-size chunks by character count with configurable
/// overlap.
///
/// Simpler than [`SeparatorChunker`]: no separator preference, just a
/// sliding window. Cut points are snapped to UTF-8 boundaries.
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl FixedSizeChunker {
    /// Create a new `FixedSizeChunker`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if `chunk_size` is zero or
    /// `chunk_overlap >= chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        validate_params(chunk_size, chunk_overlap)?;
        Ok(Self { chunk_size, chunk_overlap })
    }
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        let text = &document.text;
        if text.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut start = 0;
        let mut index = 0;
        let step = self.chunk_size - self.chunk_overlap;

        loop {
            let mut end = (start + self.chunk_size).min(text.len());
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            if end <= start {
                // chunk_size is narrower than the next code point; emit it whole.
                end = next_boundary(text, start + 1);
            }
            chunks.push(make_chunk(document, index, start, &text[start..end]));
            index += 1;

            if end >= text.len() {
                break;
            }

            let mut next = start + step;
            while next < text.len() && !text.is_char_boundary(next) {
                next += 1;
            }
            if next <= start || next >= text.len() {
                // Window already reached the tail; emit it and stop.
                if end < text.len() {
                    chunks.push(make_chunk(document, index, end, &text[end..]));
                }
                break;
            }
            start = next;
        }

        chunks
    }
}
