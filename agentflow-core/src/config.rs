use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// The closed set of wire dialects this workspace speaks.
///
/// Selection is a match on this enum, never a string-keyed factory lookup —
/// see the "Dynamic-dispatch provider selection" design note this crate's
/// sibling crates are built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Anthropic,
    Gemini,
    OpenaiCompat,
    Ollama,
}

/// Which built-in bundle of tools an agent starts from, before
/// `tools_allow`/`tools_deny` are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolProfile {
    Minimal,
    Coding,
    Messaging,
    Full,
}

/// Configuration for the hybrid memory search engine (C4), owned by the
/// caller and forwarded per-search rather than cached globally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemorySearchConfig {
    pub enabled: bool,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub max_results: usize,
    pub min_score: f32,
    pub hybrid_weights: HybridWeights,
    pub embedding_model: String,
    pub ef_search: u32,
}

/// Weights applied when combining vector and text search scores. Need not
/// sum to 1.0 — see P5 in the workspace's testable-properties list for what
/// "scaling vector_weight up" is required to preserve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HybridWeights {
    pub vector: f32,
    pub text: f32,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            vector: 0.7,
            text: 0.3,
        }
    }
}

impl Default for MemorySearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            chunk_size: 400,
            chunk_overlap: 80,
            max_results: 6,
            min_score: 0.35,
            hybrid_weights: HybridWeights::default(),
            embedding_model: "all-MiniLM-L6-v2".to_string(),
            ef_search: 100,
        }
    }
}

/// Everything the runner needs to drive one agent for one turn.
///
/// Value type: the caller owns it and passes it in; the runner borrows it
/// for the duration of a single `run`/`chat` call and never retains it
/// across turns (per this crate's ownership rules).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub id: i64,
    pub provider: Provider,
    pub model_name: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub rate_limit_enabled: bool,
    pub rate_limit_rpm: u32,
    pub tool_profile: ToolProfile,
    #[serde(default)]
    pub tools_allow: HashSet<String>,
    #[serde(default)]
    pub tools_deny: HashSet<String>,
    pub memory_search_enabled: bool,
    #[serde(default)]
    pub memory_search_config: MemorySearchConfig,
}

/// Resolves the set of built-in/profile tool names implied by a profile.
/// Kept as a plain function (not a method on `ToolProfile`) so
/// `agentflow-tool`, which owns the actual tool name constants, can be the
/// single source of truth; this lives here only because `AgentConfig` needs
/// something to call during resolution and callers outside `agentflow-tool`
/// may want to inspect the mapping without depending on the tool registry.
pub fn profile_tool_names(profile: ToolProfile, registered: &HashMap<String, ()>) -> HashSet<String> {
    match profile {
        ToolProfile::Full => registered.keys().cloned().collect(),
        ToolProfile::Minimal => HashSet::new(),
        ToolProfile::Coding => registered
            .keys()
            .filter(|name| matches!(name.as_str(), "calculator" | "get_datetime"))
            .cloned()
            .collect(),
        ToolProfile::Messaging => registered
            .keys()
            .filter(|name| matches!(name.as_str(), "get_datetime" | "web_search" | "memory_search"))
            .cloned()
            .collect(),
    }
}

/// Applies the tool-resolution invariant from this workspace's data model:
/// `((profile ∪ tools_allow) ∖ tools_deny) ∩ registered`. Deny strictly
/// dominates allow.
pub fn resolve_effective_tools(
    profile_names: &HashSet<String>,
    tools_allow: &HashSet<String>,
    tools_deny: &HashSet<String>,
    registered: &HashSet<String>,
) -> HashSet<String> {
    profile_names
        .union(tools_allow)
        .filter(|name| !tools_deny.contains(*name))
        .filter(|name| registered.contains(*name))
        .cloned()
        .collect()
}
