//! The QA pipeline orchestrator.
//!
//! [`QaPipeline`] sequences Retriever → Relevance Gate → Answer Synthesizer
//! for one question per invocation, following a fixed state machine:
//!
//! ```text
//! Received → Retrieving → Gating → Synthesizing → Done
//!                  \          \           \
//!                   `→ Error   `→ Done     `→ Error
//!                              (fallback)
//! ```
//!
//! Retrieval failures are hard errors — no context was ever obtained, so
//! there is nothing safe to say. Gate failures are absorbed fail-closed
//! into the fallback answer. Synthesis failures are hard errors again.
//!
//! # Example
//!
//! ```rust,ignore
//! use docqa_agent::{QaPipeline, QaRequest};
//!
//! let pipeline = QaPipeline::builder()
//!     .retrieval(retrieval_pipeline)
//!     .collection("factsheet")
//!     .chat_model(model)
//!     .build()?;
//!
//! let response = pipeline.answer(QaRequest::new("What is the fund's name?")).await?;
//! println!("{}", response.output);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use docqa_model::ChatModel;
use docqa_rag::{RetrievalPipeline, join_context};

use crate::error::{AgentError, Result};
use crate::gate::{LlmRelevanceGate, RelevanceClassifier};
use crate::policy::FALLBACK_ANSWER;
use crate::synthesizer::AnswerSynthesizer;

/// An incoming question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaRequest {
    /// The question text.
    pub input: String,
}

impl QaRequest {
    /// Create a request from a question string.
    pub fn new(input: impl Into<String>) -> Self {
        Self { input: input.into() }
    }
}

/// The final answer, paired with the originating question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaResponse {
    /// The original question.
    pub input: String,
    /// The answer text: a grounded synthesis, or the fixed fallback
    /// sentence when the corpus had nothing relevant.
    pub output: String,
    /// The states the pipeline traversed, in order. Not serialized; kept
    /// for observability and tests.
    #[serde(skip)]
    pub trace: Vec<QaState>,
}

/// States of the per-question pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QaState {
    /// Holding the incoming question.
    Received,
    /// Embedding the question and searching the index.
    Retrieving,
    /// Judging whether the retrieved context answers the question.
    Gating,
    /// Generating the grounded answer.
    Synthesizing,
    /// Terminal: the response is final and immutable.
    Done,
    /// Terminal: a hard failure surfaced to the caller.
    Error,
}

/// The QA pipeline: retrieval, relevance gating, and answer synthesis
/// behind a single `answer` call.
///
/// Holds only shared, read-mostly handles; one pipeline value can serve
/// many concurrent questions, each running its own state machine.
pub struct QaPipeline {
    retrieval: Arc<RetrievalPipeline>,
    collection: String,
    gate: Arc<dyn RelevanceClassifier>,
    synthesizer: AnswerSynthesizer,
}

impl QaPipeline {
    /// Create a new [`QaPipelineBuilder`].
    pub fn builder() -> QaPipelineBuilder {
        QaPipelineBuilder::default()
    }

    /// Answer one question.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Retrieval`] if retrieval fails (including
    /// embedding-provider failures) and [`AgentError::Model`] if answer
    /// synthesis fails. A failed relevance gate is not an error: the
    /// response carries the fixed fallback answer instead.
    pub async fn answer(&self, request: QaRequest) -> Result<QaResponse> {
        let mut trace = vec![QaState::Received];

        trace.push(QaState::Retrieving);
        let results = self.retrieval.retrieve(&self.collection, &request.input).await.map_err(
            |e| {
                info!(state = ?QaState::Error, error = %e, "retrieval failed");
                AgentError::Retrieval(e)
            },
        )?;
        let context = join_context(&results);

        trace.push(QaState::Gating);
        let relevant = match self.gate.is_relevant(&request.input, &context).await {
            Ok(verdict) => verdict,
            Err(e) => {
                // Fail closed: a broken gate must not block a user-facing
                // answer, and must not let unvetted context through.
                warn!(error = %e, "relevance gate failed; treating context as not relevant");
                false
            }
        };

        if !relevant {
            trace.push(QaState::Done);
            info!(retrieved = results.len(), "question not covered by corpus; returning fallback");
            return Ok(QaResponse {
                input: request.input,
                output: FALLBACK_ANSWER.to_string(),
                trace,
            });
        }

        trace.push(QaState::Synthesizing);
        let output = self.synthesizer.synthesize(&request.input, &context).await.map_err(|e| {
            info!(state = ?QaState::Error, error = %e, "answer synthesis failed");
            AgentError::Model(e)
        })?;

        trace.push(QaState::Done);
        info!(retrieved = results.len(), answer_len = output.len(), "answered question");
        Ok(QaResponse { input: request.input, output, trace })
    }
}

/// Builder for constructing a [`QaPipeline`].
///
/// `retrieval`, `collection`, and `chat_model` are required. The chat
/// model drives both the relevance gate and the synthesizer; pass
/// [`classifier`](QaPipelineBuilder::classifier) to substitute a custom
/// gate implementation.
#[derive(Default)]
pub struct QaPipelineBuilder {
    retrieval: Option<Arc<RetrievalPipeline>>,
    collection: Option<String>,
    chat_model: Option<Arc<dyn ChatModel>>,
    classifier: Option<Arc<dyn RelevanceClassifier>>,
}

impl QaPipelineBuilder {
    /// Set the retrieval pipeline.
    pub fn retrieval(mut self, retrieval: Arc<RetrievalPipeline>) -> Self {
        self.retrieval = Some(retrieval);
        self
    }

    /// Set the collection to answer from.
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Set the chat model used for gating and synthesis.
    pub fn chat_model(mut self, model: Arc<dyn ChatModel>) -> Self {
        self.chat_model = Some(model);
        self
    }

    /// Override the relevance classifier (defaults to
    /// [`LlmRelevanceGate`] over the chat model).
    pub fn classifier(mut self, classifier: Arc<dyn RelevanceClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Build the [`QaPipeline`], validating that all required parts are set.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ConfigError`] if a required part is missing.
    pub fn build(self) -> Result<QaPipeline> {
        let retrieval = self
            .retrieval
            .ok_or_else(|| AgentError::ConfigError("retrieval is required".to_string()))?;
        let collection = self
            .collection
            .ok_or_else(|| AgentError::ConfigError("collection is required".to_string()))?;
        let chat_model = self
            .chat_model
            .ok_or_else(|| AgentError::ConfigError("chat_model is required".to_string()))?;

        let gate = self
            .classifier
            .unwrap_or_else(|| Arc::new(LlmRelevanceGate::new(chat_model.clone())));

        Ok(QaPipeline {
            retrieval,
            collection,
            gate,
            synthesizer: AnswerSynthesizer::new(chat_model),
        })
    }
}
