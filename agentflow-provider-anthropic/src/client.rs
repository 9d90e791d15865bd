//! Anthropic API client struct and builder.

use agentflow_core::{ConfigError, GenerateRequest, LLMResponse, ProviderAdapter};
use async_trait::async_trait;

use crate::error::{map_http_status, map_reqwest_error};
use crate::mapping::{from_wire, to_wire};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client for the Anthropic Messages API.
///
/// Implements [`ProviderAdapter`] for use anywhere a provider is accepted.
pub struct Anthropic {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl Anthropic {
    /// Builds a client. Fails at construction, never at first call, if the
    /// API key is empty — the Rust analogue of this workspace's
    /// "missing SDK dependency" configuration failure.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self {
            api_key,
            model: model.into(),
            base_url: "https://api.anthropic.com".to_string(),
            client: reqwest::Client::new(),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }
        self.base_url = base_url;
        Ok(self)
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

#[async_trait]
impl ProviderAdapter for Anthropic {
    async fn generate(&self, request: GenerateRequest) -> LLMResponse {
        let body = to_wire(&request, &self.model);

        tracing::debug!(url = %self.messages_url(), model = %self.model, "sending anthropic request");

        let response = match self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return LLMResponse::error(map_reqwest_error(err), &self.model),
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => return LLMResponse::error(map_reqwest_error(err), &self.model),
        };

        if !status.is_success() {
            return LLMResponse::error(map_http_status(status, &text), &self.model);
        }

        let json: serde_json::Value = match serde_json::from_str(&text) {
            Ok(json) => json,
            Err(err) => return LLMResponse::error(format!("invalid JSON response: {err}"), &self.model),
        };

        match from_wire(&json, &self.model) {
            Ok(response) => response,
            Err(message) => LLMResponse::error(message, &self.model),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_is_rejected_at_construction() {
        let result = Anthropic::new("", "claude-test");
        assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn default_base_url_is_set() {
        let client = Anthropic::new("sk-ant-test", "claude-test").unwrap();
        assert_eq!(client.base_url, "https://api.anthropic.com");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let client = Anthropic::new("sk-ant-test", "claude-test").unwrap();
        assert!(matches!(client.with_base_url("not-a-url"), Err(ConfigError::InvalidBaseUrl(_))));
    }

    #[test]
    fn messages_url_includes_path() {
        let client = Anthropic::new("sk-ant-test", "claude-test")
            .unwrap()
            .with_base_url("http://localhost:9999")
            .unwrap();
        assert_eq!(client.messages_url(), "http://localhost:9999/v1/messages");
    }

    #[test]
    fn model_name_matches_constructor() {
        let client = Anthropic::new("sk-ant-test", "claude-opus-4-5").unwrap();
        assert_eq!(client.model_name(), "claude-opus-4-5");
    }
}
