use agentflow_core::{JsonType, Parameter, ToolDefinition, ToolResult};
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::registry::ToolDyn;

/// Characters the `calculator` tool will evaluate. Anything outside this
/// class — in particular every ASCII letter and underscore — is rejected
/// before `evalexpr` ever sees the string, so no identifier lookup, no
/// function call, and no way to smuggle code through the expression.
const ALLOWED_CHARS: &str = "0123456789+-*/.() ";

pub struct Calculator {
    definition: ToolDefinition,
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition {
                name: "calculator".to_string(),
                description: "Evaluates a basic arithmetic expression over +, -, *, /, and parentheses.".to_string(),
                parameters: vec![Parameter::required(
                    "expression",
                    JsonType::String,
                    "Arithmetic expression to evaluate, e.g. \"(2 + 3) * 4\"",
                )],
                require_approval: false,
                allow_in_sandbox: true,
            },
        }
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolDyn for Calculator {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Map<String, Value>) -> ToolResult {
        let Some(expression) = params.get("expression").and_then(Value::as_str) else {
            return ToolResult::error("expression must be a string");
        };

        if let Some(bad) = expression.chars().find(|c| !ALLOWED_CHARS.contains(*c)) {
            return ToolResult::error(format!("invalid characters in expression: '{bad}'"));
        }

        match evalexpr::eval(expression) {
            Ok(value) => match value.as_number() {
                Ok(number) => {
                    let mut data = Map::new();
                    data.insert("result".to_string(), Value::from(number));
                    ToolResult::success(format_result(number), data)
                }
                Err(_) => ToolResult::error("expression did not evaluate to a number"),
            },
            Err(err) => ToolResult::error(format!("evaluation error: {err}")),
        }
    }
}

fn format_result(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
