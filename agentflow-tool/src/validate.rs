use agentflow_core::{JsonType, ToolDefinition};
use serde_json::{Map, Value};

/// Checks `params` against `def`'s declared parameters: required presence,
/// declared type, and (when present) enum membership. Extra parameters not
/// declared on `def` are accepted silently, for forward compatibility.
///
/// Returns the first violation found as a human-readable message suitable
/// for handing straight back to the model inside a `ToolResult::error`.
pub fn validate_params(def: &ToolDefinition, params: &Map<String, Value>) -> Result<(), String> {
    for parameter in &def.parameters {
        if parameter.required && !params.contains_key(&parameter.name) {
            return Err(format!("missing required parameter: {}", parameter.name));
        }
    }

    for parameter in &def.parameters {
        let Some(value) = params.get(&parameter.name) else {
            continue;
        };

        if !matches_json_type(value, parameter.json_type) {
            return Err(format!(
                "parameter '{}' expected type '{}', got {}",
                parameter.name,
                type_name(parameter.json_type),
                value_type_name(value)
            ));
        }

        if let Some(allowed) = &parameter.r#enum {
            let Some(text) = value.as_str() else {
                return Err(format!("parameter '{}' expected type 'string'", parameter.name));
            };
            if !allowed.iter().any(|candidate| candidate == text) {
                return Err(format!(
                    "parameter '{}' must be one of {:?}, got '{text}'",
                    parameter.name, allowed
                ));
            }
        }
    }

    Ok(())
}

fn matches_json_type(value: &Value, json_type: JsonType) -> bool {
    match json_type {
        JsonType::String => value.is_string(),
        // Number accepts int-or-float, per this workspace's validation rules.
        JsonType::Number => value.is_number(),
        JsonType::Boolean => value.is_boolean(),
        JsonType::Array => value.is_array(),
        JsonType::Object => value.is_object(),
    }
}

fn type_name(json_type: JsonType) -> &'static str {
    match json_type {
        JsonType::String => "string",
        JsonType::Number => "number",
        JsonType::Boolean => "boolean",
        JsonType::Array => "array",
        JsonType::Object => "object",
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
