//! The chat model trait and its error taxonomy.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when calling a chat model.
///
/// These are transient, provider-side failures: callers decide whether to
/// propagate, retry, or fall back — no retry happens inside the model
/// implementations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The provider was unreachable or rejected the request.
    #[error("Model provider unavailable ({provider}): {message}")]
    Unavailable {
        /// The provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The provider rate-limited the request.
    #[error("Model provider rate limited ({provider}): {message}")]
    RateLimited {
        /// The provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The provider returned a response with no usable text.
    #[error("Model provider returned empty output ({provider})")]
    EmptyResponse {
        /// The provider that produced the empty response.
        provider: String,
    },

    /// The request could not be constructed.
    #[error("Invalid model request: {0}")]
    InvalidRequest(String),
}

/// A convenience result type for chat model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// A chat model consumed as an opaque text-to-text function.
///
/// One prompt in, one completion out; no conversation state, no streaming.
/// Implementations must be `Send + Sync` so a single handle can be shared
/// across concurrent pipeline invocations.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// A short identifier for logging (model name or deployment id).
    fn name(&self) -> &str;

    /// Generate a completion for the given prompt.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Unavailable`] or [`ModelError::RateLimited`]
    /// on provider failure, and [`ModelError::EmptyResponse`] when the
    /// provider answers without any text content.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
