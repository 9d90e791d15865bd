use async_trait::async_trait;

use crate::message::{LLMResponse, Message};
use crate::tool::ToolDefinition;

/// Everything one provider adapter (C1) needs to issue a single
/// request/response cycle, already in canonical form.
///
/// Adapters translate this into their own wire dialect, transport it, and
/// translate the reply back into an [`LLMResponse`] — never the other way
/// around; nothing downstream of an adapter ever sees wire JSON.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub messages: Vec<Message>,
    pub system_prompt: Option<String>,
    pub tools: Vec<ToolDefinition>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stop_sequences: Vec<String>,
}

/// Capability every provider variant (Anthropic, Gemini, OpenAI-compatible,
/// Ollama) implements.
///
/// Selection among the four is a match on [`crate::Provider`] at
/// construction time in each `agentflow-provider-*` crate, never a
/// string-keyed factory — this trait is the shared capability surface that
/// match arrives at, not a registry key itself.
///
/// `generate` never returns `Err`: a transport or decode failure is folded
/// into `LLMResponse{stop_reason: Error, ..}` per this workspace's failure
/// semantics (construction-time `ConfigError` is the one exception that
/// propagates, and it happens before a `ProviderAdapter` value even exists).
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> LLMResponse;

    /// The model identifier this adapter was constructed with, used for
    /// `LLMResponse::model` when a call never reaches the wire (e.g. a
    /// pre-transport encode failure).
    fn model_name(&self) -> &str;
}
