//! # docqa-agent
//!
//! Grounded question answering over an indexed corpus.
//!
//! ## Overview
//!
//! This crate is the query half of DocQA: given a question and a corpus
//! already indexed by [`docqa_rag`], it retrieves candidate context, gates
//! it for relevance, and synthesizes an answer — or says plainly that the
//! corpus does not cover the question.
//!
//! - [`QaPipeline`] — the per-question state machine
//!   (retrieve → gate → synthesize)
//! - [`RelevanceClassifier`] / [`LlmRelevanceGate`] — the typed yes/no
//!   decision over retrieved context
//! - [`AnswerSynthesizer`] — one grounded generation call
//! - [`policy`] — the fallback sentence, not-found marker, and prompt
//!   templates as named constants
//!
//! ## Failure policy
//!
//! Failures before any context is obtained are hard errors. Once retrieval
//! has succeeded, the pipeline always produces a response string: a broken
//! relevance gate falls closed to the fixed fallback answer. The error
//! type stays distinct from the fallback text so callers can tell "the
//! system failed" from "the corpus lacks the answer".
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docqa_agent::{QaPipeline, QaRequest};
//!
//! let qa = QaPipeline::builder()
//!     .retrieval(retrieval_pipeline)
//!     .collection("factsheet")
//!     .chat_model(Arc::new(model))
//!     .build()?;
//!
//! let response = qa.answer(QaRequest::new("What is the fund's name?")).await?;
//! ```

pub mod error;
pub mod gate;
pub mod pipeline;
pub mod policy;
pub mod synthesizer;

pub use error::{AgentError, Result};
pub use gate::{LlmRelevanceGate, RelevanceClassifier};
pub use pipeline::{QaPipeline, QaPipelineBuilder, QaRequest, QaResponse, QaState};
pub use policy::{FALLBACK_ANSWER, NOT_FOUND_ANSWER};
pub use synthesizer::AnswerSynthesizer;
