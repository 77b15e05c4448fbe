//! Answer synthesis: one grounded generation call per question.

use std::sync::Arc;

use tracing::debug;

use docqa_model::{ChatModel, ModelError};

use crate::policy::synthesis_prompt;

/// Produces a grounded natural-language answer from question + context.
///
/// Issues exactly one chat-model call with an instruction to answer
/// strictly from the supplied context and to emit
/// [`NOT_FOUND_ANSWER`](crate::policy::NOT_FOUND_ANSWER) when the context
/// is insufficient. The model's raw text is returned as-is: there is no
/// post-validation that the answer is actually grounded, so the model can
/// still answer from parametric knowledge despite the instruction. That
/// gap is deliberate — detecting it would require a grounding check this
/// layer does not perform.
pub struct AnswerSynthesizer {
    model: Arc<dyn ChatModel>,
}

impl AnswerSynthesizer {
    /// Create a synthesizer using the given chat model.
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Generate an answer to `question` grounded in `context`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] on provider failure; the caller decides
    /// whether that is fatal.
    pub async fn synthesize(&self, question: &str, context: &str) -> Result<String, ModelError> {
        let prompt = synthesis_prompt(question, context);
        let answer = self.model.complete(&prompt).await?;
        debug!(model = self.model.name(), answer_len = answer.len(), "synthesized answer");
        Ok(answer)
    }
}
