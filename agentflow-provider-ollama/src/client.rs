//! Ollama API client struct and builder.

use agentflow_core::{ConfigError, GenerateRequest, LLMResponse, ProviderAdapter};
use async_trait::async_trait;

use crate::error::{map_http_status, map_reqwest_error};
use crate::mapping::{from_wire, to_wire};

/// Client for a local (or remote) Ollama server's `/api/chat` endpoint.
///
/// Unlike the hosted providers, Ollama has no notion of an API key by
/// default — construction never fails on that account. A bearer token is
/// still accepted via [`Ollama::with_api_key`] for deployments that sit
/// behind an authenticating proxy.
pub struct Ollama {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl Ollama {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            api_key: None,
            model: model.into(),
            base_url: "http://localhost:11434".to_string(),
            client: reqwest::Client::new(),
        }
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

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

#[async_trait]
impl ProviderAdapter for Ollama {
    async fn generate(&self, request: GenerateRequest) -> LLMResponse {
        let body = to_wire(&request, &self.model);

        tracing::debug!(url = %self.chat_url(), model = %self.model, "sending ollama request");

        let mut builder = self.client.post(self.chat_url()).json(&body);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = match builder.send().await {
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
