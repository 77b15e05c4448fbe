//! Error types for the `docqa-rag` crate.

use thiserror::Error;

/// Errors that can occur in retrieval operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// A configuration validation error. Fatal: rejected before any
    /// pipeline run.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An embedding's dimensionality does not match the collection's
    /// established dimensionality. Fatal to that insert; the collection
    /// is left unchanged.
    #[error("Dimension mismatch: collection expects {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimensionality the collection was created with.
        expected: usize,
        /// The dimensionality of the offending embedding.
        actual: usize,
    },

    /// The embedding provider was unreachable or returned malformed output.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    VectorStoreError {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred during document chunking.
    #[error("Chunking error: {0}")]
    ChunkingError(String),

    /// An error in pipeline orchestration not covered by the above.
    #[error("Pipeline error: {0}")]
    PipelineError(String),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
