use agentflow_core::{JsonType, Parameter, ToolDefinition, ToolResult};
use agentflow_memory::{MemorySearchService, SearchType};
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::registry::ToolDyn;

/// Wraps a [`MemorySearchService`] bound to one agent, surfacing it to the
/// model as a callable tool. The service itself is agent-agnostic; this
/// wrapper is what fixes `agent_id` for the lifetime of one tool instance.
pub struct MemorySearch {
    definition: ToolDefinition,
    service: MemorySearchService,
    agent_id: Option<i64>,
}

impl MemorySearch {
    pub fn new(service: MemorySearchService, agent_id: Option<i64>) -> Self {
        Self {
            definition: ToolDefinition {
                name: "memory_search".to_string(),
                description: "Searches this agent's indexed memory for relevant past content."
                    .to_string(),
                parameters: vec![
                    Parameter::required("query", JsonType::String, "Text to search for"),
                    Parameter::optional(
                        "max_results",
                        JsonType::Number,
                        "Maximum number of results to return (1-10)",
                        Value::from(6),
                    ),
                    Parameter::optional(
                        "search_type",
                        JsonType::String,
                        "Retrieval strategy: \"hybrid\", \"vector\", or \"text\"",
                        Value::String("hybrid".to_string()),
                    )
                    .with_enum(["hybrid", "vector", "text"]),
                ],
                require_approval: false,
                allow_in_sandbox: true,
            },
            service,
            agent_id,
        }
    }
}

#[async_trait]
impl ToolDyn for MemorySearch {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Map<String, Value>) -> ToolResult {
        let Some(query) = params.get("query").and_then(Value::as_str) else {
            return ToolResult::error("query must be a string");
        };
        let max_results = params
            .get("max_results")
            .and_then(Value::as_u64)
            .unwrap_or(6)
            .clamp(1, 10) as usize;
        let search_type = match params.get("search_type").and_then(Value::as_str) {
            Some("vector") => SearchType::Vector,
            Some("text") => SearchType::Text,
            _ => SearchType::Hybrid,
        };

        let mut results = self.service.search(query, self.agent_id, search_type).await;
        results.truncate(max_results);

        let output = if results.is_empty() {
            "No matching memory found.".to_string()
        } else {
            results
                .iter()
                .map(|r| format!("[{:.2}] {}", r.score, r.content))
                .collect::<Vec<_>>()
                .join("\n")
        };

        let mut data = Map::new();
        data.insert(
            "results".to_string(),
            serde_json::to_value(&results).unwrap_or(Value::Array(Vec::new())),
        );
        ToolResult::success(output, data)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use agentflow_core::{MemorySearchConfig, ToolStatus};
    use agentflow_memory::HashEncoder;

    use super::*;

    fn tool() -> MemorySearch {
        let service = MemorySearchService::new(MemorySearchConfig::default(), Arc::new(HashEncoder::default()));
        MemorySearch::new(service, Some(1))
    }

    #[tokio::test]
    async fn missing_query_is_an_error() {
        let result = tool().execute(Map::new()).await;
        assert_eq!(result.status, ToolStatus::Error);
    }

    #[tokio::test]
    async fn empty_corpus_returns_success_with_no_matches() {
        let mut params = Map::new();
        params.insert("query".to_string(), Value::String("anything".to_string()));
        let result = tool().execute(params).await;
        assert_eq!(result.status, ToolStatus::Success);
        assert!(result.output.contains("No matching memory"));
    }

    #[tokio::test]
    async fn max_results_is_clamped_to_ten() {
        let search_tool = tool();
        search_tool.service.index_message(Some(1), 1, "hello world").await;
        let mut params = Map::new();
        params.insert("query".to_string(), Value::String("hello".to_string()));
        params.insert("max_results".to_string(), Value::from(999));
        let result = search_tool.execute(params).await;
        assert_eq!(result.status, ToolStatus::Success);
    }
}
