//! The relevance gate: a typed binary classifier over free-form model text.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use docqa_model::{ChatModel, ModelError};

use crate::policy::relevance_prompt;

/// Classifies whether retrieved context actually answers a question.
///
/// The contract is strict: implementations accept arbitrary free text and
/// return a plain boolean. Errors are the caller's to handle; the pipeline
/// treats a failed gate as "not relevant" (fail-closed).
#[async_trait]
pub trait RelevanceClassifier: Send + Sync {
    /// Return `true` if `context` contains what is needed to answer
    /// `question`.
    async fn is_relevant(&self, question: &str, context: &str)
    -> Result<bool, ModelError>;
}

/// A [`RelevanceClassifier`] backed by a single chat-model judgment call.
///
/// The model is instructed to reply with a single `yes`/`no` token.
/// Ambiguous-output policy: only a clean affirmative — a reply that is
/// nothing but `yes`, modulo whitespace, case, and trailing punctuation —
/// counts as relevant. Everything else, including hedges like
/// "yes and no", is not relevant. (This replaces the looser
/// substring-for-"yes" check, which would accept such hedges.)
pub struct LlmRelevanceGate {
    model: Arc<dyn ChatModel>,
}

impl LlmRelevanceGate {
    /// Create a gate using the given chat model.
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }
}

/// True only for a reply that is a bare affirmative token.
fn is_clean_affirmative(reply: &str) -> bool {
    let trimmed = reply.trim().trim_end_matches(['.', '!', ',']).trim();
    trimmed.eq_ignore_ascii_case("yes")
}

#[async_trait]
impl RelevanceClassifier for LlmRelevanceGate {
    async fn is_relevant(
        &self,
        question: &str,
        context: &str,
    ) -> Result<bool, ModelError> {
        let prompt = relevance_prompt(question, context);
        let reply = self.model.complete(&prompt).await?;
        let verdict = is_clean_affirmative(&reply);
        debug!(model = self.model.name(), verdict, raw = %reply.trim(), "relevance judgment");
        Ok(verdict)
    }
}
