//! Canonical types shared by every crate in this workspace: the message/tool
//! data model (C6), agent configuration, and the one error type that is
//! allowed to propagate out of the core (`ConfigError`).
//!
//! Nothing in this crate talks to a network or a clock; it exists so that
//! `agentflow-tool`, the four `agentflow-provider-*` crates, `agentflow-
//! ratelimit`, `agentflow-memory`, and `agentflow-runner` all agree on the
//! same shapes without depending on each other.

mod config;
mod error;
mod message;
mod provider;
mod tool;

pub use config::{
    AgentConfig, HybridWeights, MemorySearchConfig, Provider, ToolProfile, profile_tool_names,
    resolve_effective_tools,
};
pub use error::ConfigError;
pub use message::{LLMResponse, Message, Role, StopReason, ToolCall};
pub use provider::{GenerateRequest, ProviderAdapter};
pub use tool::{JsonType, Parameter, ToolDefinition, ToolResult, ToolStatus};
