//! Tool-schema translation (C2 → wire), one function per dialect in
//! §4.1/§4.2's per-provider table. Each `agentflow-provider-*` crate calls
//! the function matching its own wire format when assembling a request
//! body; nothing here talks to a network.

use agentflow_core::ToolDefinition;
use serde_json::{Value, json};

/// Builds the JSON-Schema `{type: object, properties, required}` object
/// shared by every dialect's parameter encoding.
fn json_schema(def: &ToolDefinition) -> Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();
    for parameter in &def.parameters {
        let mut schema = json!({
            "type": json_type_name(parameter.json_type),
            "description": parameter.description,
        });
        if let Some(values) = &parameter.r#enum {
            schema["enum"] = json!(values);
        }
        if let Some(default) = &parameter.default {
            schema["default"] = default.clone();
        }
        properties.insert(parameter.name.clone(), schema);
        if parameter.required {
            required.push(Value::String(parameter.name.clone()));
        }
    }
    json!({
        "type": "object",
        "properties": Value::Object(properties),
        "required": required,
    })
}

fn json_type_name(json_type: agentflow_core::JsonType) -> &'static str {
    use agentflow_core::JsonType;
    match json_type {
        JsonType::String => "string",
        JsonType::Number => "number",
        JsonType::Boolean => "boolean",
        JsonType::Array => "array",
        JsonType::Object => "object",
    }
}

/// `{name, description, input_schema}` per tool, as a bare JSON array —
/// Anthropic's `tools` request field.
pub fn render_for_anthropic(defs: &[ToolDefinition]) -> Value {
    Value::Array(
        defs.iter()
            .map(|def| {
                json!({
                    "name": def.name,
                    "description": def.description,
                    "input_schema": json_schema(def),
                })
            })
            .collect(),
    )
}

/// `{function_declarations: [{name, description, parameters}, ...]}` —
/// Gemini wraps the whole list in one envelope rather than submitting a
/// bare array.
pub fn render_for_gemini(defs: &[ToolDefinition]) -> Value {
    let declarations: Vec<Value> = defs
        .iter()
        .map(|def| {
            json!({
                "name": def.name,
                "description": def.description,
                "parameters": json_schema(def),
            })
        })
        .collect();
    json!({ "function_declarations": declarations })
}

/// `[{type: "function", function: {name, description, parameters}}, ...]` —
/// shared by OpenAI-compatible and Ollama wire formats.
pub fn render_for_openai(defs: &[ToolDefinition]) -> Value {
    Value::Array(
        defs.iter()
            .map(|def| {
                json!({
                    "type": "function",
                    "function": {
                        "name": def.name,
                        "description": def.description,
                        "parameters": json_schema(def),
                    },
                })
            })
            .collect(),
    )
}

/// Ollama accepts the same shape as OpenAI; kept as a distinct function
/// (rather than an alias re-export) so a future Ollama-specific quirk has
/// somewhere to land without touching the OpenAI call site.
pub fn render_for_ollama(defs: &[ToolDefinition]) -> Value {
    render_for_openai(defs)
}
