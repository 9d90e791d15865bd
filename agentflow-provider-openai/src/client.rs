//! OpenAI-compatible API client struct and builder. Works against any
//! endpoint implementing the Chat Completions contract (OpenAI itself, or a
//! compatible proxy), selected via `base_url`.

use agentflow_core::{ConfigError, GenerateRequest, LLMResponse, ProviderAdapter};
use async_trait::async_trait;

use crate::error::{map_http_status, map_reqwest_error};
use crate::mapping::{from_wire, to_wire};

pub struct OpenAiCompat {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiCompat {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self {
            api_key,
            model: model.into(),
            base_url: "https://api.openai.com".to_string(),
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

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiCompat {
    async fn generate(&self, request: GenerateRequest) -> LLMResponse {
        let body = to_wire(&request, &self.model);

        tracing::debug!(url = %self.chat_completions_url(), model = %self.model, "sending openai-compatible request");

        let response = match self
            .client
            .post(self.chat_completions_url())
            .bearer_auth(&self.api_key)
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
