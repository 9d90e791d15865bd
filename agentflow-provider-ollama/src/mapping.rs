//! Request/response mapping between the canonical model and the Ollama
//! `/api/chat` wire format.
//!
//! Reference: <https://github.com/ollama/ollama/blob/main/docs/api.md#chat-request>

use agentflow_core::{GenerateRequest, LLMResponse, Message, Role, StopReason, ToolCall};
use serde_json::{Map, Value, json};

/// Ollama never returns a native call id — synthesized the same way Gemini's
/// adapter does, isolated behind one helper (Open Question ii).
fn next_call_id(index: usize) -> String {
    format!("call_{index}")
}

pub fn to_wire(request: &GenerateRequest, default_model: &str) -> Value {
    let mut messages = Vec::new();
    if let Some(system) = &request.system_prompt {
        messages.push(json!({"role": "system", "content": system}));
    }
    messages.extend(request.messages.iter().map(map_message));

    let mut body = json!({
        "model": default_model,
        "messages": messages,
        "stream": false,
        "options": {
            "temperature": request.temperature,
            "num_predict": request.max_tokens,
        },
    });

    if !request.stop_sequences.is_empty() {
        body["options"]["stop"] = json!(request.stop_sequences);
    }
    if !request.tools.is_empty() {
        body["tools"] = agentflow_tool::render_for_ollama(&request.tools);
    }

    body
}

fn map_message(message: &Message) -> Value {
    match message.role {
        Role::System => json!({"role": "system", "content": message.content}),
        Role::User => json!({"role": "user", "content": message.content}),
        Role::Assistant => {
            let mut value = json!({"role": "assistant", "content": message.content});
            if let Some(calls) = &message.tool_calls {
                if !calls.is_empty() {
                    value["tool_calls"] = Value::Array(
                        calls
                            .iter()
                            .map(|call| {
                                json!({
                                    "function": {
                                        "name": call.name,
                                        "arguments": Value::Object(call.arguments.clone()),
                                    },
                                })
                            })
                            .collect(),
                    );
                }
            }
            value
        }
        Role::Tool => json!({"role": "tool", "content": message.content}),
    }
}

/// Accepts tool-call arguments as either a JSON object or a JSON-encoded
/// string, per this adapter's tolerance table.
fn decode_arguments(value: &Value) -> Map<String, Value> {
    if let Some(object) = value.as_object() {
        return object.clone();
    }
    if let Some(text) = value.as_str() {
        return serde_json::from_str::<Value>(text)
            .ok()
            .and_then(|v| v.as_object().cloned())
            .unwrap_or_else(Map::new);
    }
    Map::new()
}

pub fn from_wire(body: &Value, model: &str) -> Result<LLMResponse, String> {
    let message = body
        .get("message")
        .ok_or_else(|| "response missing 'message'".to_string())?;

    let content = message["content"].as_str().unwrap_or_default().to_string();

    let mut tool_calls = Vec::new();
    if let Some(calls) = message["tool_calls"].as_array() {
        for (index, call) in calls.iter().enumerate() {
            let name = call["function"]["name"].as_str().unwrap_or_default().to_string();
            let arguments = decode_arguments(&call["function"]["arguments"]);
            tool_calls.push(ToolCall {
                id: next_call_id(index),
                name,
                arguments,
            });
        }
    }

    let stop_reason = if tool_calls.is_empty() {
        match body["done_reason"].as_str() {
            Some("length") => StopReason::MaxTokens,
            _ => StopReason::EndTurn,
        }
    } else {
        StopReason::ToolUse
    };

    let input_tokens = body["prompt_eval_count"].as_u64().unwrap_or(0) as u32;
    let output_tokens = body["eval_count"].as_u64().unwrap_or(0) as u32;

    Ok(LLMResponse::new(content, stop_reason, tool_calls, input_tokens, output_tokens, model))
}
