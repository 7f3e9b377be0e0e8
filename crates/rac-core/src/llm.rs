//! LLM provider access.
//!
//! The wizard talks to a provider through the [`LlmClient`] trait so
//! tests can substitute scripted responses. The shipping implementation
//! targets the OpenRouter chat-completions endpoint.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{Result, WizardError};

/// Default completion budget per step.
pub const DEFAULT_MAX_TOKENS: u32 = 10_000;
/// Default sampling temperature; low, since outputs must parse as JSON.
pub const DEFAULT_TEMPERATURE: f64 = 0.3;

const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// A chat-completion backend.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single-turn prompt and return the assistant's text.
    async fn complete(&self, prompt: &str, max_tokens: u32, temperature: f64) -> Result<String>;
}

/// Client for the OpenRouter API.
pub struct OpenRouterClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenRouterClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: OPENROUTER_URL.to_string(),
        }
    }

    /// Build a client from `OPENROUTER_API_KEY` and `RAC_LLM_MODEL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY").map_err(|_| {
            WizardError::Configuration {
                message: "OPENROUTER_API_KEY is not set".to_string(),
            }
        })?;
        let model = std::env::var("RAC_LLM_MODEL").map_err(|_| WizardError::Configuration {
            message: "RAC_LLM_MODEL is not set".to_string(),
        })?;
        Ok(Self::new(api_key, model))
    }

    /// Override the endpoint URL. Used by tests against a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl LlmClient for OpenRouterClient {
    async fn complete(&self, prompt: &str, max_tokens: u32, temperature: f64) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": max_tokens,
            "temperature": temperature,
        });

        log::debug!("sending completion request to {}", self.base_url);
        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let payload = response.text().await.unwrap_or_default();
            let message = extract_error_message(&payload)
                .unwrap_or_else(|| payload.chars().take(500).collect());
            return Err(WizardError::UpstreamLlm {
                status: status.as_u16(),
                message,
            });
        }

        let payload: Value = response.json().await?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| WizardError::malformed_response(&payload.to_string()))?;
        Ok(content.trim().to_string())
    }
}

/// Pull a human-readable message out of a provider error payload.
fn extract_error_message(payload: &str) -> Option<String> {
    let value: Value = serde_json::from_str(payload).ok()?;
    value["error"]["message"]
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message_from_payload() {
        let payload = r#"{"error": {"message": "rate limited", "code": 429}}"#;
        assert_eq!(
            extract_error_message(payload),
            Some("rate limited".to_string())
        );
    }

    #[test]
    fn test_extract_error_message_handles_garbage() {
        assert_eq!(extract_error_message("not json"), None);
        assert_eq!(extract_error_message("{}"), None);
    }
}
