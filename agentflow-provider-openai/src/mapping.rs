//! Request/response mapping between the canonical model and the OpenAI Chat
//! Completions wire format.
//!
//! Reference: <https://platform.openai.com/docs/api-reference/chat>

use agentflow_core::{GenerateRequest, LLMResponse, Message, Role, StopReason, ToolCall};
use serde_json::{Map, Value, json};

pub fn to_wire(request: &GenerateRequest, default_model: &str) -> Value {
    let mut messages = Vec::new();
    if let Some(system) = &request.system_prompt {
        messages.push(json!({"role": "system", "content": system}));
    }
    messages.extend(request.messages.iter().map(map_message));

    let mut body = json!({
        "model": default_model,
        "messages": messages,
        "temperature": request.temperature,
        "max_tokens": request.max_tokens,
    });

    if !request.stop_sequences.is_empty() {
        body["stop"] = json!(request.stop_sequences);
    }
    if !request.tools.is_empty() {
        body["tools"] = agentflow_tool::render_for_openai(&request.tools);
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
                                    "id": call.id,
                                    "type": "function",
                                    "function": {
                                        "name": call.name,
                                        "arguments": Value::Object(call.arguments.clone()).to_string(),
                                    },
                                })
                            })
                            .collect(),
                    );
                }
            }
            value
        }
        Role::Tool => json!({
            "role": "tool",
            "tool_call_id": message.tool_call_id.clone().unwrap_or_default(),
            "content": message.content,
        }),
    }
}

pub fn from_wire(body: &Value, model: &str) -> Result<LLMResponse, String> {
    let choice = body["choices"]
        .as_array()
        .and_then(|c| c.first())
        .ok_or_else(|| "response missing 'choices'".to_string())?;

    let message = &choice["message"];
    let content = message["content"].as_str().unwrap_or_default().to_string();

    let mut tool_calls = Vec::new();
    if let Some(calls) = message["tool_calls"].as_array() {
        for call in calls {
            let id = call["id"].as_str().unwrap_or_default().to_string();
            let name = call["function"]["name"].as_str().unwrap_or_default().to_string();
            let arguments = call["function"]["arguments"]
                .as_str()
                .and_then(|s| serde_json::from_str::<Value>(s).ok())
                .and_then(|v| v.as_object().cloned())
                .unwrap_or_else(Map::new);
            tool_calls.push(ToolCall { id, name, arguments });
        }
    }

    let stop_reason = match choice["finish_reason"].as_str() {
        Some("stop") => StopReason::EndTurn,
        Some("length") => StopReason::MaxTokens,
        Some("tool_calls") => StopReason::ToolUse,
        _ => StopReason::EndTurn,
    };

    let input_tokens = body["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as u32;
    let output_tokens = body["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32;

    Ok(LLMResponse::new(content, stop_reason, tool_calls, input_tokens, output_tokens, model))
}
