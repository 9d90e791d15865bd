//! Agent Runner (C5): orchestrates the rate limiter, tool registry, and a
//! caller-supplied provider adapter into one bounded tool-calling turn.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use agentflow_core::{
    AgentConfig, GenerateRequest, LLMResponse, Message, ProviderAdapter, ToolStatus,
    profile_tool_names, resolve_effective_tools,
};
use agentflow_ratelimit::RateLimiterRegistry;
use agentflow_tool::ToolRegistry;

/// Tuning knobs for [`Runner::run`], all optional — `Default` matches the
/// behavior a bare `run(provider, config, messages)` call would give.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub system_prompt: Option<String>,
    pub enable_tools: bool,
    /// Further restricts the resolved tool set to these names, applied after
    /// profile/allow/deny resolution. Carried over unconditionally rather
    /// than only under some profiles, since every profile may need it.
    pub tool_names: Option<HashSet<String>>,
    pub max_tool_iterations: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            system_prompt: None,
            enable_tools: true,
            tool_names: None,
            max_tool_iterations: 10,
        }
    }
}

/// Orchestrates C1 (via a caller-supplied `&dyn ProviderAdapter`), C2, and
/// C3 into one turn. Holds no provider of its own — a runner is shared
/// across every agent regardless of which provider each one is configured
/// for, and the caller picks the adapter per call.
pub struct Runner {
    tools: Arc<ToolRegistry>,
    rate_limiters: Arc<RateLimiterRegistry>,
}

impl Runner {
    pub fn new(tools: Arc<ToolRegistry>, rate_limiters: Arc<RateLimiterRegistry>) -> Self {
        Self { tools, rate_limiters }
    }

    /// Runs one bounded tool-calling turn. Returns the final response and
    /// the history with every message this turn appended — including the
    /// final assistant turn, whether reached by natural termination or
    /// iteration-cap exhaustion.
    pub async fn run(
        &self,
        provider: &dyn ProviderAdapter,
        config: &AgentConfig,
        messages: Vec<Message>,
        options: RunOptions,
    ) -> (LLMResponse, Vec<Message>) {
        if config.rate_limit_enabled && config.rate_limit_rpm > 0 {
            let limiter = self.rate_limiters.get_or_create(config.id, config.rate_limit_rpm);
            limiter.acquire_async().await;
        }

        let registered: HashSet<String> = self.tools.names();
        let registered_map: HashMap<String, ()> = registered.iter().cloned().map(|n| (n, ())).collect();
        let profile_names = profile_tool_names(config.tool_profile, &registered_map);
        let mut effective =
            resolve_effective_tools(&profile_names, &config.tools_allow, &config.tools_deny, &registered);
        if let Some(filter) = &options.tool_names {
            effective.retain(|name| filter.contains(name));
        }

        let tools_enabled = options.enable_tools && !effective.is_empty();
        let tool_defs: Vec<_> = if tools_enabled {
            self.tools
                .definitions()
                .into_iter()
                .filter(|def| effective.contains(&def.name))
                .collect()
        } else {
            Vec::new()
        };

        let mut messages = messages;
        let max_iterations = options.max_tool_iterations;
        let mut iteration = 0usize;

        loop {
            let offer_tools = tools_enabled && iteration < max_iterations;
            let request = GenerateRequest {
                messages: messages.clone(),
                system_prompt: options.system_prompt.clone(),
                tools: if offer_tools { tool_defs.clone() } else { Vec::new() },
                temperature: config.temperature,
                max_tokens: config.max_tokens,
                stop_sequences: Vec::new(),
            };

            tracing::debug!(agent_id = config.id, iteration, offer_tools, "calling provider");
            let response = provider.generate(request).await;

            if !response.has_tool_calls() || iteration >= max_iterations {
                let tool_calls = if response.tool_calls.is_empty() {
                    None
                } else {
                    Some(response.tool_calls.clone())
                };
                messages.push(Message::assistant(response.content.clone(), tool_calls));
                return (response, messages);
            }

            messages.push(Message::assistant(response.content.clone(), Some(response.tool_calls.clone())));
            for call in &response.tool_calls {
                let content = if effective.contains(&call.name) {
                    let result = self.tools.execute(&call.name, call.arguments.clone()).await;
                    match result.status {
                        ToolStatus::Error => result.error.unwrap_or_default(),
                        _ => result.output,
                    }
                } else {
                    format!("Tool '{}' not found", call.name)
                };
                messages.push(Message::tool_result(call.id.clone(), content, Some(call.name.clone())));
            }
            iteration += 1;
        }
    }

    /// Appends `user_message` to `history` (or a new one), delegates to
    /// [`Runner::run`], and returns the final content alongside the updated
    /// history. Does not append a second assistant turn — `run` already did.
    pub async fn chat(
        &self,
        provider: &dyn ProviderAdapter,
        config: &AgentConfig,
        user_message: &str,
        history: Option<Vec<Message>>,
        system_prompt: Option<String>,
        enable_tools: bool,
    ) -> (String, Vec<Message>) {
        let mut messages = history.unwrap_or_default();
        messages.push(Message::user(user_message));

        let options = RunOptions {
            system_prompt,
            enable_tools,
            ..Default::default()
        };
        let (response, messages) = self.run(provider, config, messages, options).await;
        (response.content, messages)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use agentflow_core::{JsonType, Parameter, Provider, StopReason, ToolCall, ToolDefinition, ToolProfile, ToolResult};
    use async_trait::async_trait;
    use serde_json::{Map, Value};

    use super::*;

    /// Replays a scripted sequence of responses, one per call, regardless of
    /// what request it receives — enough to drive every E2E scenario in
    /// this workspace's testable-properties list without a live model.
    struct ScriptedProvider {
        responses: Mutex<std::collections::VecDeque<LLMResponse>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<LLMResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
            }
        }
    }

    #[async_trait]
    impl ProviderAdapter for ScriptedProvider {
        async fn generate(&self, _request: GenerateRequest) -> LLMResponse {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| LLMResponse::new("", StopReason::EndTurn, vec![], 0, 0, "scripted"))
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    struct Calculator;

    #[async_trait]
    impl agentflow_tool::ToolDyn for Calculator {
        fn definition(&self) -> &ToolDefinition {
            static DEF: std::sync::OnceLock<ToolDefinition> = std::sync::OnceLock::new();
            DEF.get_or_init(|| ToolDefinition {
                name: "calculator".to_string(),
                description: "evaluates arithmetic".to_string(),
                parameters: vec![Parameter::required("expression", JsonType::String, "expr")],
                require_approval: false,
                allow_in_sandbox: true,
            })
        }

        async fn execute(&self, params: Map<String, Value>) -> ToolResult {
            let Some(expr) = params.get("expression").and_then(Value::as_str) else {
                return ToolResult::error("parameter 'expression' expected type 'string'");
            };
            if expr.chars().any(|c| !"0123456789+-*/.() ".contains(c)) {
                return ToolResult::error("invalid characters in expression");
            }
            ToolResult::success("42", Map::new())
        }
    }

    fn config() -> AgentConfig {
        AgentConfig {
            id: 1,
            provider: Provider::Anthropic,
            model_name: "test-model".to_string(),
            base_url: None,
            api_key: None,
            system_prompt: "you are a test agent".to_string(),
            temperature: 0.7,
            max_tokens: 1024,
            rate_limit_enabled: false,
            rate_limit_rpm: 0,
            tool_profile: ToolProfile::Full,
            tools_allow: HashSet::new(),
            tools_deny: HashSet::new(),
            memory_search_enabled: false,
            memory_search_config: Default::default(),
        }
    }

    fn runner_with_calculator() -> Runner {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Calculator)).unwrap();
        Runner::new(Arc::new(registry), Arc::new(RateLimiterRegistry::new()))
    }

    fn tool_call(name: &str, arguments: Value) -> ToolCall {
        ToolCall {
            id: "call_0".to_string(),
            name: name.to_string(),
            arguments: arguments.as_object().unwrap().clone(),
        }
    }

    #[tokio::test]
    async fn calculator_success_produces_four_message_history() {
        let runner = runner_with_calculator();
        let provider = ScriptedProvider::new(vec![
            LLMResponse::new(
                "",
                StopReason::ToolUse,
                vec![tool_call("calculator", serde_json::json!({"expression": "6*7"}))],
                0,
                0,
                "test-model",
            ),
            LLMResponse::new("42", StopReason::EndTurn, vec![], 0, 0, "test-model"),
        ]);

        let (response, history) = runner
            .run(&provider, &config(), vec![Message::user("What is 6*7?")], RunOptions::default())
            .await;

        assert_eq!(response.content, "42");
        assert_eq!(history.len(), 4);
    }

    #[tokio::test]
    async fn parameter_rejection_surfaces_type_error_in_history() {
        let runner = runner_with_calculator();
        let provider = ScriptedProvider::new(vec![
            LLMResponse::new(
                "",
                StopReason::ToolUse,
                vec![tool_call("calculator", serde_json::json!({"expression": 123}))],
                0,
                0,
                "test-model",
            ),
            LLMResponse::new("handled", StopReason::EndTurn, vec![], 0, 0, "test-model"),
        ]);

        let (_response, history) = runner
            .run(&provider, &config(), vec![Message::user("calc")], RunOptions::default())
            .await;

        let tool_result = history.iter().find(|m| m.role == agentflow_core::Role::Tool).unwrap();
        assert!(tool_result.content.contains("string"));
    }

    #[tokio::test]
    async fn calculator_safety_rejects_identifiers() {
        let runner = runner_with_calculator();
        let provider = ScriptedProvider::new(vec![
            LLMResponse::new(
                "",
                StopReason::ToolUse,
                vec![tool_call("calculator", serde_json::json!({"expression": "__import__('os')"}))],
                0,
                0,
                "test-model",
            ),
            LLMResponse::new("handled", StopReason::EndTurn, vec![], 0, 0, "test-model"),
        ]);

        let (_response, history) = runner
            .run(&provider, &config(), vec![Message::user("calc")], RunOptions::default())
            .await;

        let tool_result = history.iter().find(|m| m.role == agentflow_core::Role::Tool).unwrap();
        assert!(tool_result.content.contains("invalid"));
    }

    #[tokio::test]
    async fn iteration_cap_makes_exactly_one_final_toolless_call() {
        let runner = runner_with_calculator();
        // Every scripted response carries a tool call — adversarially never
        // terminates on its own.
        let responses: Vec<LLMResponse> = (0..10)
            .map(|_| {
                LLMResponse::new(
                    "",
                    StopReason::ToolUse,
                    vec![tool_call("calculator", serde_json::json!({"expression": "1+1"}))],
                    0,
                    0,
                    "test-model",
                )
            })
            .collect();
        let provider = ScriptedProvider::new(responses);

        let options = RunOptions {
            max_tool_iterations: 3,
            ..Default::default()
        };
        let (_response, history) = runner
            .run(&provider, &config(), vec![Message::user("loop forever")], options)
            .await;

        // 3 tool cycles (assistant + tool-result each) + final assistant = 1(user) + 3*2 + 1 = 8
        assert_eq!(history.len(), 8);
    }

    #[tokio::test]
    async fn unknown_tool_name_reports_not_found() {
        let runner = runner_with_calculator();
        let provider = ScriptedProvider::new(vec![
            LLMResponse::new(
                "",
                StopReason::ToolUse,
                vec![tool_call("nonexistent", serde_json::json!({}))],
                0,
                0,
                "test-model",
            ),
            LLMResponse::new("done", StopReason::EndTurn, vec![], 0, 0, "test-model"),
        ]);

        let (_response, history) = runner
            .run(&provider, &config(), vec![Message::user("hi")], RunOptions::default())
            .await;

        let tool_result = history.iter().find(|m| m.role == agentflow_core::Role::Tool).unwrap();
        assert!(tool_result.content.contains("not found"));
    }

    #[tokio::test]
    async fn chat_does_not_double_append_the_final_assistant_message() {
        let runner = runner_with_calculator();
        let provider = ScriptedProvider::new(vec![LLMResponse::new(
            "hello there",
            StopReason::EndTurn,
            vec![],
            0,
            0,
            "test-model",
        )]);

        let (content, history) = runner.chat(&provider, &config(), "hi", None, None, true).await;
        assert_eq!(content, "hello there");
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().content, "hello there");
    }

    #[tokio::test]
    async fn disabling_tools_never_offers_them() {
        let runner = runner_with_calculator();
        let provider = ScriptedProvider::new(vec![LLMResponse::new(
            "no tools here",
            StopReason::EndTurn,
            vec![],
            0,
            0,
            "test-model",
        )]);

        let options = RunOptions {
            enable_tools: false,
            ..Default::default()
        };
        let (response, _history) = runner
            .run(&provider, &config(), vec![Message::user("hi")], options)
            .await;
        assert_eq!(response.content, "no tools here");
    }
}
