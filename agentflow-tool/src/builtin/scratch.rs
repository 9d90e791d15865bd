use std::sync::Mutex;

use agentflow_core::{JsonType, Parameter, ToolDefinition, ToolResult};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::registry::ToolDyn;

/// In-process key/value scratchpad, separate from the durable C4 memory
/// engine — this is per-run working storage an agent can stash small notes
/// in, not indexed and not searchable. Paired with [`MemoryRetrieve`].
pub struct MemoryStore {
    definition: ToolDefinition,
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition {
                name: "memory_store".to_string(),
                description: "Stores a value under a key in the agent's scratch memory."
                    .to_string(),
                parameters: vec![
                    Parameter::required("key", JsonType::String, "Key to store the value under"),
                    Parameter::required("value", JsonType::String, "Value to store"),
                ],
                require_approval: false,
                allow_in_sandbox: true,
            },
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("scratch memory lock poisoned").get(key).cloned()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolDyn for MemoryStore {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Map<String, Value>) -> ToolResult {
        let (Some(key), Some(value)) = (
            params.get("key").and_then(Value::as_str),
            params.get("value").and_then(Value::as_str),
        ) else {
            return ToolResult::error("key and value must both be strings");
        };
        self.entries
            .lock()
            .expect("scratch memory lock poisoned")
            .insert(key.to_string(), value.to_string());
        ToolResult::success(format!("Stored value under '{key}'"), Map::new())
    }
}

/// Reads back a value previously written by [`MemoryStore`]. Shares the same
/// map, so the two tools must be constructed together via
/// [`scratch_pair`].
pub struct MemoryRetrieve {
    definition: ToolDefinition,
    backing: std::sync::Arc<MemoryStore>,
}

impl MemoryRetrieve {
    fn new(backing: std::sync::Arc<MemoryStore>) -> Self {
        Self {
            definition: ToolDefinition {
                name: "memory_retrieve".to_string(),
                description: "Retrieves a value previously stored under a key.".to_string(),
                parameters: vec![Parameter::required(
                    "key",
                    JsonType::String,
                    "Key to retrieve the value for",
                )],
                require_approval: false,
                allow_in_sandbox: true,
            },
            backing,
        }
    }
}

#[async_trait]
impl ToolDyn for MemoryRetrieve {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Map<String, Value>) -> ToolResult {
        let Some(key) = params.get("key").and_then(Value::as_str) else {
            return ToolResult::error("key must be a string");
        };
        match self.backing.get(key) {
            Some(value) => ToolResult::success(value, Map::new()),
            None => ToolResult::error(format!("no value stored under '{key}'")),
        }
    }
}

/// Builds a `memory_store`/`memory_retrieve` pair sharing one scratch map.
pub fn scratch_pair() -> (std::sync::Arc<MemoryStore>, MemoryRetrieve) {
    let store = std::sync::Arc::new(MemoryStore::new());
    let retrieve = MemoryRetrieve::new(store.clone());
    (store, retrieve)
}
