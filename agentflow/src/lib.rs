#![deny(missing_docs)]
//! # agentflow — umbrella crate
//!
//! A single import surface for the agentflow agent-orchestration core:
//! the canonical message/tool model, the tool registry and its built-ins,
//! the sliding-window rate limiter, the hybrid memory search engine, the
//! bounded tool-calling runner, and the four provider adapters, each
//! reachable behind its own feature flag plus a `prelude` for the common
//! path of wiring them together.

#[cfg(feature = "core")]
pub use agentflow_core;
#[cfg(feature = "core")]
pub use agentflow_memory;
#[cfg(feature = "core")]
pub use agentflow_ratelimit;
#[cfg(feature = "core")]
pub use agentflow_runner;
#[cfg(feature = "core")]
pub use agentflow_tool;

#[cfg(feature = "provider-anthropic")]
pub use agentflow_provider_anthropic;
#[cfg(feature = "provider-gemini")]
pub use agentflow_provider_gemini;
#[cfg(feature = "provider-ollama")]
pub use agentflow_provider_ollama;
#[cfg(feature = "provider-openai")]
pub use agentflow_provider_openai;

/// Happy-path imports for wiring up a runner over a registered tool set.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use agentflow_core::{
        AgentConfig, GenerateRequest, LLMResponse, Message, Provider, ProviderAdapter, Role,
        StopReason, ToolCall, ToolDefinition, ToolProfile, ToolResult, ToolStatus,
    };

    #[cfg(feature = "core")]
    pub use agentflow_ratelimit::{RateLimiter, RateLimiterRegistry};

    #[cfg(feature = "core")]
    pub use agentflow_tool::{ToolDyn, ToolRegistry};

    #[cfg(feature = "core")]
    pub use agentflow_memory::{MemorySearchService, SearchType};

    #[cfg(feature = "core")]
    pub use agentflow_runner::{RunOptions, Runner};

    #[cfg(feature = "provider-anthropic")]
    pub use agentflow_provider_anthropic::Anthropic;
    #[cfg(feature = "provider-gemini")]
    pub use agentflow_provider_gemini::Gemini;
    #[cfg(feature = "provider-ollama")]
    pub use agentflow_provider_ollama::Ollama;
    #[cfg(feature = "provider-openai")]
    pub use agentflow_provider_openai::OpenAiCompat;
}
