//! Request/response mapping between the canonical model and the Gemini
//! `generateContent` wire format.
//!
//! Reference: <https://ai.google.dev/api/generate-content>

use agentflow_core::{GenerateRequest, LLMResponse, Message, Role, StopReason, ToolCall};
use serde_json::{Map, Value, json};

/// Synthesizes call ids for Gemini, which does not return its own — isolated
/// behind this one helper so a future switch to provider-native ids touches
/// a single call site (Open Question ii).
fn next_call_id(index: usize) -> String {
    format!("call_{index}")
}

pub fn to_wire(request: &GenerateRequest, default_model: &str) -> Value {
    let mut body = json!({
        "model": default_model,
        "contents": map_messages(&request.messages),
        "generationConfig": {
            "temperature": request.temperature,
            "maxOutputTokens": request.max_tokens,
        },
    });

    if let Some(system) = &request.system_prompt {
        body["systemInstruction"] = json!({"parts": [{"text": system}]});
    }
    if !request.stop_sequences.is_empty() {
        body["generationConfig"]["stopSequences"] = json!(request.stop_sequences);
    }
    if !request.tools.is_empty() {
        body["tools"] = json!([agentflow_tool::render_for_gemini(&request.tools)]);
    }

    body
}

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
        Role::User => json!({"role": "user", "parts": [{"text": message.content}]}),
        Role::Assistant => {
            let mut parts = Vec::new();
            if !message.content.is_empty() {
                parts.push(json!({"text": message.content}));
            }
            for call in message.tool_calls.iter().flatten() {
                parts.push(json!({
                    "functionCall": {
                        "name": call.name,
                        "args": Value::Object(call.arguments.clone()),
                    }
                }));
            }
            json!({"role": "model", "parts": parts})
        }
        Role::Tool => json!({
            "role": "user",
            "parts": [{
                "functionResponse": {
                    "name": message.name.clone().unwrap_or_default(),
                    "response": {"content": message.content},
                }
            }],
        }),
        Role::System => unreachable!("filtered above"),
    }
}

pub fn from_wire(body: &Value, model: &str) -> Result<LLMResponse, String> {
    let candidate = body["candidates"]
        .as_array()
        .and_then(|c| c.first())
        .ok_or_else(|| "response missing 'candidates'".to_string())?;

    let parts = candidate["content"]["parts"].as_array().cloned().unwrap_or_default();

    let mut content = String::new();
    let mut tool_calls = Vec::new();
    for (index, part) in parts.iter().enumerate() {
        if let Some(text) = part["text"].as_str() {
            content.push_str(text);
        }
        if let Some(call) = part.get("functionCall") {
            let name = call["name"].as_str().unwrap_or_default().to_string();
            let arguments = call["args"].as_object().cloned().unwrap_or_else(Map::new);
            tool_calls.push(ToolCall {
                id: next_call_id(index),
                name,
                arguments,
            });
        }
    }

    let stop_reason = match candidate["finishReason"].as_str() {
        Some("STOP") => StopReason::EndTurn,
        Some("MAX_TOKENS") => StopReason::MaxTokens,
        _ => StopReason::EndTurn,
    };

    let input_tokens = body["usageMetadata"]["promptTokenCount"].as_u64().unwrap_or(0) as u32;
    let output_tokens = body["usageMetadata"]["candidatesTokenCount"].as_u64().unwrap_or(0) as u32;

    Ok(LLMResponse::new(content, stop_reason, tool_calls, input_tokens, output_tokens, model))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_becomes_system_instruction() {
        let request = GenerateRequest {
            system_prompt: Some("be terse".to_string()),
            ..Default::default()
        };
        let body = to_wire(&request, "gemini-test");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be terse");
    }

    #[test]
    fn assistant_role_is_model() {
        let request = GenerateRequest {
            messages: vec![Message::assistant("hi", None)],
            ..Default::default()
        };
        let body = to_wire(&request, "gemini-test");
        assert_eq!(body["contents"][0]["role"], "model");
    }

    #[test]
    fn tool_result_becomes_function_response_part() {
        let message = Message::tool_result("call_0", "42", Some("calculator".to_string()));
        let request = GenerateRequest {
            messages: vec![message],
            ..Default::default()
        };
        let body = to_wire(&request, "gemini-test");
        assert!(body["contents"][0]["parts"][0].get("functionResponse").is_some());
    }

    #[test]
    fn missing_function_call_id_is_synthesized() {
        let body = json!({
            "candidates": [{
                "content": {"parts": [{"functionCall": {"name": "calculator", "args": {"expression": "6*7"}}}]},
                "finishReason": "STOP",
            }],
        });
        let response = from_wire(&body, "gemini-test").unwrap();
        assert_eq!(response.tool_calls[0].id, "call_0");
    }

    #[test]
    fn missing_candidates_is_a_decode_error() {
        let body = json!({});
        assert!(from_wire(&body, "gemini-test").is_err());
    }
}
