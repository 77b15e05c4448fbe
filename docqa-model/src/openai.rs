//! OpenAI chat model implementation.
//!
//! This module is only available when the `openai` feature is enabled.

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, error};

use crate::chat::{ChatModel, ModelError, Result};

/// A [`ChatModel`] backed by the OpenAI chat completions API, or any
/// OpenAI-compatible endpoint (Ollama, vLLM, etc.).
///
/// Requests are non-streaming: one prompt, one completion. Temperature
/// defaults to 0.0 so the relevance gate and synthesizer behave as
/// deterministically as the provider allows.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_model::openai::OpenAIChatModel;
///
/// let model = OpenAIChatModel::new("sk-...", "gpt-4o-mini");
/// let text = model.complete("Answer in one word: yes or no?").await?;
/// ```
pub struct OpenAIChatModel {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAIChatModel {
    /// Create a new client for the standard OpenAI API.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key.into());
        Self { client: Client::with_config(config), model: model.into(), temperature: 0.0 }
    }

    /// Create a client using the `OPENAI_API_KEY` environment variable.
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| ModelError::Unavailable {
            provider: "OpenAI".into(),
            message: "OPENAI_API_KEY environment variable not set".into(),
        })?;
        Ok(Self::new(api_key, model))
    }

    /// Create a client for an OpenAI-compatible API at `base_url`.
    pub fn compatible(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let config =
            OpenAIConfig::new().with_api_key(api_key.into()).with_api_base(base_url.into());
        Self { client: Client::with_config(config), model: model.into(), temperature: 0.0 }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn map_err(&self, e: OpenAIError) -> ModelError {
        let message = e.to_string();
        if message.to_lowercase().contains("rate limit") {
            ModelError::RateLimited { provider: "OpenAI".into(), message }
        } else {
            ModelError::Unavailable { provider: "OpenAI".into(), message }
        }
    }
}

#[async_trait]
impl ChatModel for OpenAIChatModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!(model = %self.model, prompt_len = prompt.len(), "chat completion request");

        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| ModelError::InvalidRequest(e.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![message.into()])
            .temperature(self.temperature)
            .build()
            .map_err(|e| ModelError::InvalidRequest(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            error!(model = %self.model, error = %e, "chat completion failed");
            self.map_err(e)
        })?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ModelError::EmptyResponse { provider: "OpenAI".into() });
        }

        Ok(text)
    }
}
