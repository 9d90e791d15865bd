use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The JSON-Schema-ish primitive types a tool parameter may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

/// One parameter of a [`ToolDefinition`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub json_type: JsonType,
    pub description: String,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#enum: Option<Vec<String>>,
}

fn default_true() -> bool {
    true
}

impl Parameter {
    pub fn required(
        name: impl Into<String>,
        json_type: JsonType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            json_type,
            description: description.into(),
            required: true,
            default: None,
            r#enum: None,
        }
    }

    pub fn optional(
        name: impl Into<String>,
        json_type: JsonType,
        description: impl Into<String>,
        default: Value,
    ) -> Self {
        Self {
            name: name.into(),
            json_type,
            description: description.into(),
            required: false,
            default: Some(default),
            r#enum: None,
        }
    }

    #[must_use]
    pub fn with_enum(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.r#enum = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// A tool's static shape: what it's called, what it's for, and what
/// arguments it accepts. Dialect rendering (Anthropic/Gemini/OpenAI/Ollama)
/// happens downstream in `agentflow-tool`; this struct carries no wire
/// format of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub require_approval: bool,
    #[serde(default = "default_true")]
    pub allow_in_sandbox: bool,
}

/// Execution status of a [`ToolResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    Success,
    Error,
    Pending,
    ApprovalRequired,
}

/// The outcome of running one tool once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub status: ToolStatus,
    pub output: String,
    #[serde(default)]
    pub data: serde_json::Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success(output: impl Into<String>, data: serde_json::Map<String, Value>) -> Self {
        Self {
            status: ToolStatus::Success,
            output: output.into(),
            data,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status: ToolStatus::Error,
            output: String::new(),
            data: serde_json::Map::new(),
            error: Some(message),
        }
    }
}
