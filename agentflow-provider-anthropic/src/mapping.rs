//! Request/response mapping between the canonical model and the Anthropic
//! Messages API wire format.
//!
//! Reference: <https://docs.anthropic.com/en/api/messages>

use agentflow_core::{GenerateRequest, LLMResponse, Message, Role, StopReason, ToolCall};
use serde_json::{Map, Value, json};

pub fn to_wire(request: &GenerateRequest, default_model: &str) -> Value {
    let mut body = json!({
        "model": default_model,
        "messages": map_messages(&request.messages),
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
    });

    if let Some(system) = &request.system_prompt {
        body["system"] = Value::String(system.clone());
    }
    if !request.stop_sequences.is_empty() {
        body["stop_sequences"] = json!(request.stop_sequences);
    }
    if !request.tools.is_empty() {
        body["tools"] = agentflow_tool::render_for_anthropic(&request.tools);
    }

    body
}

/// System messages are lifted into the top-level `system` field (handled by
/// the caller); everything else keeps its role, with tool-result messages
/// becoming a user-role turn carrying a `tool_result` block.
fn map_messages(messages: &[Message]) -> Value {
    Value::Array(
        messages
            .iter()
            .filter(|m| m.role != Role::System)
            .map(map_message)
            .collect(),
    )
}

fn map_message(message: &Message) -> Value {
    match message.role {
        Role::User => json!({
            "role": "user",
            "content": [{"type": "text", "text": message.content}],
        }),
        Role::Assistant => {
            let mut blocks = Vec::new();
            if !message.content.is_empty() {
                blocks.push(json!({"type": "text", "text": message.content}));
            }
            for call in message.tool_calls.iter().flatten() {
                blocks.push(json!({
                    "type": "tool_use",
                    "id": call.id,
                    "name": call.name,
                    "input": Value::Object(call.arguments.clone()),
                }));
            }
            json!({"role": "assistant", "content": blocks})
        }
        Role::Tool => json!({
            "role": "user",
            "content": [{
                "type": "tool_result",
                "tool_use_id": message.tool_call_id.clone().unwrap_or_default(),
                "content": message.content,
            }],
        }),
        Role::System => unreachable!("filtered above"),
    }
}

/// Decodes an Anthropic Messages API response body into a canonical
/// [`LLMResponse`]. `Err` carries a human-readable decode failure message —
/// the client folds it into `LLMResponse::error` rather than propagating it.
pub fn from_wire(body: &Value, model: &str) -> Result<LLMResponse, String> {
    let blocks = body["content"]
        .as_array()
        .ok_or_else(|| "response missing 'content' array".to_string())?;

    let mut content = String::new();
    let mut tool_calls = Vec::new();
    for block in blocks {
        match block["type"].as_str() {
            Some("text") => {
                if let Some(text) = block["text"].as_str() {
                    content.push_str(text);
                }
            }
            Some("tool_use") => {
                let id = block["id"].as_str().unwrap_or_default().to_string();
                let name = block["name"].as_str().unwrap_or_default().to_string();
                let arguments = block["input"].as_object().cloned().unwrap_or_else(Map::new);
                tool_calls.push(ToolCall { id, name, arguments });
            }
            _ => {}
        }
    }

    let stop_reason = match body["stop_reason"].as_str() {
        Some("end_turn") => StopReason::EndTurn,
        Some("max_tokens") => StopReason::MaxTokens,
        Some("tool_use") => StopReason::ToolUse,
        Some("stop_sequence") => StopReason::StopSequence,
        _ => StopReason::EndTurn,
    };

    let input_tokens = body["usage"]["input_tokens"].as_u64().unwrap_or(0) as u32;
    let output_tokens = body["usage"]["output_tokens"].as_u64().unwrap_or(0) as u32;

    Ok(LLMResponse::new(content, stop_reason, tool_calls, input_tokens, output_tokens, model))
}
