//! OpenAI-compatible LLM provider.
//!
//! Works with OpenAI, Groq, and other APIs exposing `/chat/completions`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::error::LLMError;
use super::provider::{ChatProvider, ModelPolicy};
use super::types::{ChatRequest, ChatResponse};

/// OpenAI-compatible provider (works for OpenAI and Groq).
pub struct OpenAICompatibleProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    models: ModelPolicy,
}

impl OpenAICompatibleProvider {
    /// Build a provider whose every call is bounded by `timeout`.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, LLMError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            temperature: None,
            max_tokens: None,
            models: ModelPolicy::default(),
        })
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_model_policy(mut self, models: ModelPolicy) -> Self {
        self.models = models;
        self
    }
}

#[async_trait]
impl ChatProvider for OpenAICompatibleProvider {
    async fn complete(&self, prompt: &str, model: &str) -> Result<String, LLMError> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut request = ChatRequest::user_prompt(self.models.resolve(model), prompt);
        request.temperature = self.temperature;
        request.max_tokens = self.max_tokens;

        let mut req = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");

        if let Some(ref key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }

        let response = req.json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(LLMError::Api { status, message });
        }

        let body: ChatResponse = response.json().await?;
        Ok(body.into_text())
    }
}
