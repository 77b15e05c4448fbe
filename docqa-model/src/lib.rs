//! # docqa-model
//!
//! Chat model integrations for grounded document QA.
//!
//! ## Overview
//!
//! This crate defines the [`ChatModel`] trait — the single seam through
//! which the QA pipeline talks to a language model — together with:
//!
//! - [`OpenAIChatModel`] — OpenAI and OpenAI-compatible chat completion
//!   APIs (feature `openai`)
//! - [`MockChatModel`] — scripted model for deterministic tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docqa_model::openai::OpenAIChatModel;
//!
//! let model = OpenAIChatModel::from_env("gpt-4o-mini")?;
//! let reply = model.complete("Say hello.").await?;
//! ```
//!
//! Providers are injected as `Arc<dyn ChatModel>` so tests can substitute
//! the mock without touching pipeline code.

pub mod chat;
pub mod mock;
#[cfg(feature = "openai")]
pub mod openai;

pub use chat::{ChatModel, ModelError, Result};
pub use mock::MockChatModel;
#[cfg(feature = "openai")]
pub use openai::OpenAIChatModel;
