//! Data types for documents, chunks, and retrieval results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Metadata key recording a chunk's position within its parent document.
pub const META_CHUNK_INDEX: &str = "chunk_index";

/// Metadata key recording a chunk's byte offset within the source text.
pub const META_OFFSET: &str = "offset";

/// A source document containing extracted plain text and metadata.
///
/// Documents are immutable once created: the extraction layer produces
/// them, the ingestion path consumes them, and nothing mutates them
/// in between.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// The extracted plain-text content.
    pub text: String,
    /// Key-value metadata (source identifier, document type, ...).
    pub metadata: HashMap<String, String>,
    /// Optional URI pointing to the original source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_uri: Option<String>,
}

impl Document {
    /// Create a document with empty metadata and no source URI.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into(), metadata: HashMap::new(), source_uri: None }
    }

    /// Attach a metadata entry, consuming and returning the document.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A segment of a [`Document`] with its vector embedding.
///
/// Chunk IDs are `{document_id}_{chunk_index}`. Metadata is inherited from
/// the parent document plus [`META_CHUNK_INDEX`] and [`META_OFFSET`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier for the chunk.
    pub id: String,
    /// The text content of the chunk.
    pub text: String,
    /// The vector embedding for this chunk's text. Empty until the
    /// ingestion pipeline attaches one.
    pub embedding: Vec<f32>,
    /// Metadata inherited from the parent document plus chunk-specific fields.
    pub metadata: HashMap<String, String>,
    /// The ID of the parent [`Document`].
    pub document_id: String,
}

/// A retrieved [`Chunk`] paired with a similarity score.
///
/// Ordering is significant: retrieval returns these ranked descending by
/// score, ties broken by insertion order (earlier-inserted ranks higher).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The similarity score (higher is more similar).
    pub score: f32,
}

/// Concatenate retrieved chunk texts into a single context blob, in rank
/// order, separated by blank lines.
pub fn join_context(results: &[SearchResult]) -> String {
    results.iter().map(|r| r.chunk.text.as_str()).collect::<Vec<_>>().join("\n\n")
}
