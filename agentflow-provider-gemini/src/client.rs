//! Gemini API client struct and builder.

use agentflow_core::{ConfigError, GenerateRequest, LLMResponse, ProviderAdapter};
use async_trait::async_trait;

use crate::error::{map_http_status, map_reqwest_error};
use crate::mapping::{from_wire, to_wire};

/// Client for the Gemini `generateContent` API.
pub struct Gemini {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl Gemini {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self {
            api_key,
            model: model.into(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
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

    fn generate_url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent?key={}", self.base_url, self.model, self.api_key)
    }
}

#[async_trait]
impl ProviderAdapter for Gemini {
    async fn generate(&self, request: GenerateRequest) -> LLMResponse {
        let body = to_wire(&request, &self.model);

        tracing::debug!(model = %self.model, "sending gemini request");

        let response = match self.client.post(self.generate_url()).json(&body).send().await {
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
