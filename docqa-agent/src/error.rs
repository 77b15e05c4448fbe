//! Error types for the `docqa-agent` crate.

use thiserror::Error;

use docqa_model::ModelError;
use docqa_rag::RagError;

/// Errors surfaced by the QA pipeline.
///
/// These are the hard failures: they reach the caller instead of a fallback
/// sentence, so "the system failed" stays distinguishable from "the corpus
/// lacks the answer". Relevance-gate failures never appear here — the
/// orchestrator absorbs them fail-closed.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Retrieval failed before any context was obtained.
    #[error(transparent)]
    Retrieval(#[from] RagError),

    /// The chat model failed during answer synthesis.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The pipeline was constructed with missing or invalid parts.
    #[error("Agent configuration error: {0}")]
    ConfigError(String),
}

/// A convenience result type for agent operations.
pub type Result<T> = std::result::Result<T, AgentError>;
