use agentflow_core::{JsonType, Parameter, ToolDefinition, ToolResult};
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::registry::ToolDyn;

/// Stands in for a real web-search backend. This workspace carries no
/// outbound search provider, so the tool always succeeds with an empty
/// result set and a note explaining why — the point is to let an agent
/// exercise the tool-calling path end to end without depending on a live
/// external service.
pub struct WebSearch {
    definition: ToolDefinition,
}

impl WebSearch {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition {
                name: "web_search".to_string(),
                description: "Searches the web for a query and returns matching results."
                    .to_string(),
                parameters: vec![
                    Parameter::required("query", JsonType::String, "Search query text"),
                    Parameter::optional(
                        "num_results",
                        JsonType::Number,
                        "Maximum number of results to return",
                        Value::from(5),
                    ),
                ],
                require_approval: false,
                allow_in_sandbox: true,
            },
        }
    }
}

impl Default for WebSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolDyn for WebSearch {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Map<String, Value>) -> ToolResult {
        let Some(query) = params.get("query").and_then(Value::as_str) else {
            return ToolResult::error("query must be a string");
        };
        let num_results = params
            .get("num_results")
            .and_then(Value::as_u64)
            .unwrap_or(5);

        let mut data = Map::new();
        data.insert("query".to_string(), Value::String(query.to_string()));
        data.insert("num_results".to_string(), Value::from(num_results));
        data.insert("results".to_string(), Value::Array(Vec::new()));

        ToolResult::success(
            format!("No search backend is configured; returning 0 results for \"{query}\"."),
            data,
        )
    }
}

#[cfg(test)]
mod tests {
    use agentflow_core::ToolStatus;

    use super::*;

    #[tokio::test]
    async fn missing_query_is_an_error() {
        let result = WebSearch::new().execute(Map::new()).await;
        assert_eq!(result.status, ToolStatus::Error);
    }

    #[tokio::test]
    async fn returns_empty_results_with_the_query_echoed_back() {
        let mut params = Map::new();
        params.insert("query".to_string(), Value::String("rust async".to_string()));
        let result = WebSearch::new().execute(params).await;
        assert_eq!(result.status, ToolStatus::Success);
        assert_eq!(result.data.get("query").unwrap(), "rust async");
        assert!(result.data.get("results").unwrap().as_array().unwrap().is_empty());
    }
}
