use serde::{Deserialize, Serialize};

/// The role a [`Message`] speaks in, within one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A request from the model to invoke one registered tool.
///
/// `id` is opaque and only required to be unique within the assistant turn
/// that produced it — providers without native call identifiers (Gemini,
/// Ollama) synthesize one at the adapter boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

/// One entry in a canonical conversation history.
///
/// Immutable once appended: every mutation described by this crate's
/// consumers (the runner, the adapters) produces a *new* `Message` and
/// pushes it onto the history `Vec` rather than editing one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            tool_calls: None,
            tool_call_id: None,
            name: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            tool_calls: None,
            tool_call_id: None,
            name: None,
        }
    }

    pub fn assistant(content: impl Into<String>, tool_calls: Option<Vec<ToolCall>>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_calls,
            tool_call_id: None,
            name: None,
        }
    }

    pub fn tool_result(
        tool_call_id: impl Into<String>,
        content: impl Into<String>,
        name: Option<String>,
    ) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
            name,
        }
    }
}

/// Why the model stopped generating.
///
/// `TOOL_USE` is enforced by construction, not merely by convention: adapters
/// must set it whenever `tool_calls` is non-empty, regardless of what the
/// wire payload's own terminal flag said (see [`LLMResponse::new`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    ToolUse,
    StopSequence,
    Error,
}

/// A decoded, provider-independent model response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LLMResponse {
    pub content: String,
    pub stop_reason: StopReason,
    pub tool_calls: Vec<ToolCall>,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub model: String,
}

impl LLMResponse {
    /// Builds a response, forcing `stop_reason = ToolUse` whenever
    /// `tool_calls` is non-empty so that `stop_reason == tool_use ⇔
    /// has_tool_calls` holds for every value this crate ever constructs.
    pub fn new(
        content: impl Into<String>,
        stop_reason: StopReason,
        tool_calls: Vec<ToolCall>,
        input_tokens: u32,
        output_tokens: u32,
        model: impl Into<String>,
    ) -> Self {
        let stop_reason = if tool_calls.is_empty() {
            stop_reason
        } else {
            StopReason::ToolUse
        };
        Self {
            content: content.into(),
            stop_reason,
            tool_calls,
            input_tokens,
            output_tokens,
            model: model.into(),
        }
    }

    pub fn error(message: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: message.into(),
            stop_reason: StopReason::Error,
            tool_calls: Vec::new(),
            input_tokens: 0,
            output_tokens: 0,
            model: model.into(),
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_use_is_forced_when_tool_calls_present() {
        let call = ToolCall {
            id: "call_0".into(),
            name: "calculator".into(),
            arguments: serde_json::Map::new(),
        };
        let response = LLMResponse::new("", StopReason::EndTurn, vec![call], 0, 0, "test-model");
        assert_eq!(response.stop_reason, StopReason::ToolUse);
        assert!(response.has_tool_calls());
    }

    #[test]
    fn no_tool_calls_keeps_given_stop_reason() {
        let response = LLMResponse::new("hi", StopReason::EndTurn, vec![], 1, 1, "test-model");
        assert_eq!(response.stop_reason, StopReason::EndTurn);
        assert!(!response.has_tool_calls());
    }
}
