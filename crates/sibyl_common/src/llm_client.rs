//! Completion provider client.
//!
//! Generic interface for calling the external completion API. Ships a real
//! implementation (OpenAI chat completions over HTTPS) and a fake client for
//! testing. One call per request, no retry, no fallback model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the completion API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model requested for every completion
    #[serde(default = "default_model")]
    pub model: String,

    /// API key; normally injected from the environment at startup
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_endpoint() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_temperature() -> f64 {
    0.7
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout(),
            temperature: default_temperature(),
        }
    }
}

/// Completion errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompletionError {
    #[error("no API key configured for completion provider")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("invalid JSON response: {0}")]
    InvalidJson(String),

    #[error("request timeout after {0} seconds")]
    Timeout(u64),

    #[error("provider returned empty response")]
    EmptyResponse,
}

/// Generic completion client trait
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a single-prompt completion request and return the raw text.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Send a chat-style request with a system instruction and a user message.
    async fn chat(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, CompletionError>;
}

/// Real client against the OpenAI chat completions API
pub struct OpenAiClient {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: ProviderConfig) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompletionError::HttpError(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Model this client is configured for.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn call_chat_completions(
        &self,
        messages: Vec<serde_json::Value>,
    ) -> Result<String, CompletionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingApiKey)?;

        let url = format!("{}/v1/chat/completions", self.config.endpoint);

        let request_body = serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": self.config.temperature,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout(self.config.timeout_secs)
                } else {
                    CompletionError::HttpError(format!("request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            return Err(CompletionError::HttpError(format!(
                "HTTP {} from completion provider",
                response.status()
            )));
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidJson(format!("failed to parse response: {}", e)))?;

        // Extract content from the OpenAI response shape
        let text = response_json
            .get("choices")
            .and_then(|v| v.get(0))
            .and_then(|v| v.get("message"))
            .and_then(|v| v.get("content"))
            .and_then(|v| v.as_str())
            .ok_or(CompletionError::EmptyResponse)?;

        if text.is_empty() {
            return Err(CompletionError::EmptyResponse);
        }

        Ok(text.to_string())
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.call_chat_completions(vec![serde_json::json!({
            "role": "user",
            "content": prompt,
        })])
        .await
    }

    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, CompletionError> {
        self.call_chat_completions(vec![
            serde_json::json!({"role": "system", "content": system_prompt}),
            serde_json::json!({"role": "user", "content": user_prompt}),
        ])
        .await
    }
}

/// Fake completion client for testing
pub struct FakeCompletionClient {
    responses: Mutex<Vec<Result<String, CompletionError>>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeCompletionClient {
    /// Create a fake client with pre-defined responses
    pub fn new(responses: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a fake client that always returns the given text
    pub fn always_valid(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    /// Create a fake client that always returns an error
    pub fn always_error(error: CompletionError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Get the number of calls made
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Get the prompts the client was called with
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next_response(&self, prompt: String) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(CompletionError::EmptyResponse);
        }

        if responses.len() == 1 {
            // Keep returning the same response
            responses[0].clone()
        } else {
            responses.remove(0)
        }
    }
}

#[async_trait]
impl CompletionClient for FakeCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.next_response(prompt.to_string())
    }

    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, CompletionError> {
        self.next_response(format!("{}\n{}", system_prompt, user_prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_config_default() {
        let config = ProviderConfig::default();
        assert_eq!(config.endpoint, "https://api.openai.com");
        assert_eq!(config.model, "gpt-4");
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_fake_client_always_valid() {
        let client = FakeCompletionClient::always_valid("Choose B");

        let result = client.complete("pick one").await;
        assert_eq!(result.unwrap(), "Choose B");
        assert_eq!(client.call_count(), 1);

        // Call again, should return same response
        let result2 = client.complete("pick another").await;
        assert_eq!(result2.unwrap(), "Choose B");
        assert_eq!(client.call_count(), 2);
        assert_eq!(client.prompts(), vec!["pick one", "pick another"]);
    }

    #[tokio::test]
    async fn test_fake_client_always_error() {
        let client = FakeCompletionClient::always_error(CompletionError::EmptyResponse);

        let result = client.complete("anything").await;
        assert!(result.is_err());
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fake_client_multiple_responses() {
        let client = FakeCompletionClient::new(vec![
            Ok("first".to_string()),
            Ok("second".to_string()),
            Err(CompletionError::Timeout(30)),
        ]);

        assert_eq!(client.complete("a").await.unwrap(), "first");
        assert_eq!(client.complete("b").await.unwrap(), "second");
        assert!(client.complete("c").await.is_err());
        assert_eq!(client.call_count(), 3);
    }

    #[tokio::test]
    async fn test_fake_client_chat_records_both_parts() {
        let client = FakeCompletionClient::always_valid("ok");

        client.chat("system text", "user text").await.unwrap();

        let prompts = client.prompts();
        assert!(prompts[0].contains("system text"));
        assert!(prompts[0].contains("user text"));
    }

    #[test]
    fn test_missing_api_key_error_message() {
        let err = CompletionError::MissingApiKey;
        assert!(err.to_string().contains("API key"));
    }
}
