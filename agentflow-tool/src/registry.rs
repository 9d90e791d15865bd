use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use agentflow_core::{ToolDefinition, ToolResult, ToolStatus};
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::ToolError;
use crate::validate::validate_params;

/// One executable tool instance.
///
/// Object-safe so the registry can hold a heterogeneous collection of
/// built-ins and caller-supplied tools behind `Arc<dyn ToolDyn>`. A tool's
/// own `execute` body must never rely on unwinding for control flow — it
/// returns `ToolResult::error(...)` for anything that goes wrong, since the
/// registry is the only place a raw failure is allowed to be converted into
/// one (see this workspace's error-handling design).
#[async_trait]
pub trait ToolDyn: Send + Sync {
    fn definition(&self) -> &ToolDefinition;

    async fn execute(&self, params: Map<String, Value>) -> ToolResult;
}

/// Name → instance mapping (C2).
///
/// Registration is single-writer (`&mut self`); lookup and execution never
/// need a lock once the registry is built, matching the "registration path
/// is single-writer, lookups are lock-free" locking note for this
/// component.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolDyn>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool. Fails if a tool of the same name is already
    /// present — unlike some registries in this lineage, re-registration is
    /// never a silent overwrite here, since a duplicate name is treated as
    /// an implementer error rather than a desired hot-swap.
    pub fn register(&mut self, tool: Arc<dyn ToolDyn>) -> Result<(), ToolError> {
        let name = tool.definition().name.clone();
        if self.tools.contains_key(&name) {
            return Err(ToolError::DuplicateName(name));
        }
        self.tools.insert(name, tool);
        Ok(())
    }

    /// No-op if `name` isn't registered.
    pub fn unregister(&mut self, name: &str) {
        self.tools.remove(name);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ToolDyn>> {
        self.tools.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn names(&self) -> HashSet<String> {
        self.tools.keys().cloned().collect()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Validates `params` against the tool's declared parameters, then
    /// executes it. A lookup miss and a validation failure both produce an
    /// in-band `ToolResult::error` rather than an `Err` — this method never
    /// fails in the Rust `Result` sense, per the registry's own contract.
    pub async fn execute(&self, name: &str, params: Map<String, Value>) -> ToolResult {
        let Some(tool) = self.get(name) else {
            return ToolResult::error(format!("Tool '{name}' not found"));
        };
        if let Err(message) = validate_params(tool.definition(), &params) {
            tracing::debug!(tool = name, error = %message, "tool parameter validation failed");
            return ToolResult::error(message);
        }
        let result = tool.execute(params).await;
        if result.status == ToolStatus::Error {
            tracing::debug!(tool = name, error = ?result.error, "tool execution failed");
        }
        result
    }
}
