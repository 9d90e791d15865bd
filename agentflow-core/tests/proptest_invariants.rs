//! Property-based tests: the canonical message model's own invariants (P1,
//! P3), independent of any particular provider or tool registry.

use std::collections::HashSet;

use agentflow_core::{LLMResponse, StopReason, ToolCall, resolve_effective_tools};
use proptest::prelude::*;

fn arb_stop_reason() -> impl Strategy<Value = StopReason> {
    prop_oneof![
        Just(StopReason::EndTurn),
        Just(StopReason::MaxTokens),
        Just(StopReason::ToolUse),
        Just(StopReason::StopSequence),
        Just(StopReason::Error),
    ]
}

fn arb_tool_call() -> impl Strategy<Value = ToolCall> {
    ("[a-z_]{1,12}", "[a-z_]{1,12}").prop_map(|(id, name)| ToolCall {
        id,
        name,
        arguments: serde_json::Map::new(),
    })
}

fn arb_name_set() -> impl Strategy<Value = HashSet<String>> {
    proptest::collection::hash_set("[a-z]{1,6}", 0..6)
}

proptest! {
    /// P1: for any arbitrary `stop_reason` passed to `LLMResponse::new`, the
    /// constructed value satisfies `stop_reason == tool_use ⇔ tool_calls
    /// non-empty` regardless of which reason the caller supplied.
    #[test]
    fn stop_reason_matches_tool_calls_presence(
        reason in arb_stop_reason(),
        tool_calls in proptest::collection::vec(arb_tool_call(), 0..4),
    ) {
        let response = LLMResponse::new("", reason, tool_calls.clone(), 0, 0, "m");
        prop_assert_eq!(response.stop_reason == StopReason::ToolUse, !tool_calls.is_empty());
        prop_assert_eq!(response.has_tool_calls(), !tool_calls.is_empty());
    }

    /// P3: the effective tool set is always a subset of the registered
    /// names, never contains a denied name, and contains every allowed name
    /// that is both registered and not denied.
    #[test]
    fn effective_tools_respect_subset_deny_allow(
        profile in arb_name_set(),
        allow in arb_name_set(),
        deny in arb_name_set(),
        registered in arb_name_set(),
    ) {
        let effective = resolve_effective_tools(&profile, &allow, &deny, &registered);

        prop_assert!(effective.is_subset(&registered));
        prop_assert!(effective.is_disjoint(&deny));

        for name in allow.intersection(&registered) {
            if !deny.contains(name) {
                prop_assert!(effective.contains(name));
            }
        }
    }
}
