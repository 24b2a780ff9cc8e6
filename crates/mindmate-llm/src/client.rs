//! GroqClient -- concrete [`LanguageModel`] implementation for Groq.
//!
//! Sends chat completion requests to Groq's OpenAI-compatible endpoint.
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use mindmate_core::config::LlmConfig;
use mindmate_core::error::MindmateError;
use mindmate_engine::collaborator::{LanguageModel, LlmFailure};
use mindmate_engine::prompt::PromptPayload;

use crate::types::{ChatCompletionRequest, ChatCompletionResponse};

/// Groq chat completions client.
///
/// Does NOT derive Debug so the API key inside cannot leak through debug
/// formatting.
pub struct GroqClient {
    http: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    temperature: f64,
}

impl GroqClient {
    /// Create a client from the LLM configuration section and an API key.
    pub fn new(api_key: SecretString, config: &LlmConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create reqwest client");

        Self {
            http,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    /// Create a client reading the API key from the environment variable
    /// named in the configuration.
    pub fn from_env(config: &LlmConfig) -> Result<Self, MindmateError> {
        let key = std::env::var(&config.api_key_env).map_err(|_| {
            MindmateError::Config(format!(
                "environment variable {} is not set",
                config.api_key_env
            ))
        })?;
        Ok(Self::new(SecretString::from(key), config))
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LanguageModel for GroqClient {
    async fn complete(&self, prompt: &PromptPayload) -> Result<String, LlmFailure> {
        let request = ChatCompletionRequest::from_payload(&self.model, self.temperature, prompt);

        let response = self
            .http
            .post(self.url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmFailure::Timeout
                } else {
                    LlmFailure::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Groq API returned {}: {}", status, body);
            return Err(LlmFailure::Http(format!("status {}", status)));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmFailure::MalformedResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmFailure::MalformedResponse("response had no choices".to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================
