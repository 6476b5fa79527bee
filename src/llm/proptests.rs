//! Property-based tests for the chat completions translation layer
//!
//! Invariants checked:
//! - Empty responses are rejected
//! - Tool calls with empty names are rejected
//! - Invalid JSON arguments are rejected
//! - Message translation never produces empty output
//! - Tool results become role "tool" messages with matching ids

#![allow(clippy::redundant_closure_for_method_calls)]

use super::openai::{
    test_helpers, OpenAIChoice, OpenAIFunctionCall, OpenAIMessage, OpenAIResponse,
    OpenAIToolCall, OpenAIUsage,
};
use super::types::{ContentBlock, LlmMessage, MessageRole};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_text_block() -> impl Strategy<Value = ContentBlock> {
    "[a-zA-Z0-9 _.!?,]{1,100}".prop_map(|text| ContentBlock::Text { text })
}

/// Tool use block naming one of the weather capabilities or a stray name
fn arb_tool_use_block() -> impl Strategy<Value = ContentBlock> {
    (
        "call_[a-z0-9]{5,20}",
        prop_oneof![
            Just("get_weather_forecast".to_string()),
            Just("get_weather_alerts".to_string()),
            "[a-z_]{3,20}",
        ],
        arb_json_value(),
    )
        .prop_map(|(id, name, input)| ContentBlock::ToolUse { id, name, input })
}

fn arb_tool_result_block() -> impl Strategy<Value = ContentBlock> {
    (
        "call_[a-z0-9]{5,20}",
        "[a-zA-Z0-9 _.:!?,\n]{0,100}",
        any::<bool>(),
    )
        .prop_map(
            |(tool_use_id, content, is_error)| ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
            },
        )
}

fn arb_json_value() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        (-1000i64..1000).prop_map(|n| serde_json::Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,50}".prop_map(serde_json::Value::String),
        (-90i32..=90, -180i32..=180, "[A-Za-z ]{1,20}").prop_map(|(lat, lon, name)| {
            serde_json::json!({
                "latitude": f64::from(lat),
                "longitude": f64::from(lon),
                "location_name": name,
            })
        }),
        ("[A-Z]{2}", "[A-Za-z ]{1,20}").prop_map(|(code, name)| {
            serde_json::json!({ "state_code": code, "state_name": name })
        }),
    ]
}

fn arb_user_message() -> impl Strategy<Value = LlmMessage> {
    proptest::collection::vec(
        prop_oneof![
            3 => arb_text_block(),
            2 => arb_tool_result_block(),
        ],
        1..6,
    )
    .prop_map(|content| LlmMessage {
        role: MessageRole::User,
        content,
    })
}

fn arb_assistant_message() -> impl Strategy<Value = LlmMessage> {
    proptest::collection::vec(
        prop_oneof![
            3 => arb_text_block(),
            3 => arb_tool_use_block(),
        ],
        1..6,
    )
    .prop_map(|content| LlmMessage {
        role: MessageRole::Assistant,
        content,
    })
}

fn arb_message() -> impl Strategy<Value = LlmMessage> {
    prop_oneof![arb_user_message(), arb_assistant_message()]
}

fn make_response(
    content: Option<String>,
    tool_calls: Option<Vec<OpenAIToolCall>>,
    finish_reason: Option<String>,
) -> OpenAIResponse {
    OpenAIResponse {
        choices: vec![OpenAIChoice {
            message: OpenAIMessage {
                role: "assistant".to_string(),
                content,
                tool_calls,
                tool_call_id: None,
            },
            finish_reason,
        }],
        usage: Some(OpenAIUsage {
            prompt_tokens: 10,
            completion_tokens: 5,
        }),
    }
}

fn make_tool_call(id: &str, name: &str, arguments: &str) -> OpenAIToolCall {
    OpenAIToolCall {
        id: id.to_string(),
        r#type: "function".to_string(),
        function: OpenAIFunctionCall {
            name: name.to_string(),
            arguments: arguments.to_string(),
        },
    }
}

// ============================================================================
// Response validation
// ============================================================================

proptest! {
    #[test]
    fn prop_normalize_rejects_empty(
        finish_reason in proptest::option::of("[a-z_]{3,10}")
    ) {
        let resp = make_response(None, None, finish_reason);
        prop_assert!(test_helpers::normalize_response(resp).is_err());
    }

    #[test]
    fn prop_normalize_keeps_text(text in "[a-zA-Z0-9 ]{1,100}") {
        let resp = make_response(Some(text.clone()), None, Some("stop".to_string()));
        let normalized = test_helpers::normalize_response(resp).unwrap();
        prop_assert_eq!(normalized.text(), text);
        prop_assert!(normalized.end_turn);
    }

    /// N named tool calls with valid arguments become N ToolUse blocks in order
    #[test]
    fn prop_normalize_preserves_named_tools(
        calls in proptest::collection::vec(
            ("[a-z0-9]{5,15}", "[a-z_]{3,15}", arb_json_value()),
            1..5,
        ),
    ) {
        let expected_ids: Vec<String> = calls.iter().map(|(id, _, _)| id.clone()).collect();
        let tool_calls: Vec<OpenAIToolCall> = calls
            .into_iter()
            .map(|(id, name, args)| {
                make_tool_call(&id, &name, &serde_json::to_string(&args).unwrap())
            })
            .collect();
        let resp = make_response(None, Some(tool_calls), Some("tool_calls".to_string()));

        let normalized = test_helpers::normalize_response(resp).unwrap();
        let ids: Vec<String> = normalized
            .tool_uses()
            .into_iter()
            .map(|(id, _, _)| id.to_string())
            .collect();
        prop_assert_eq!(ids, expected_ids);
    }

    #[test]
    fn prop_normalize_rejects_empty_name_tools(
        id in "[a-z0-9]{5,15}",
        args in arb_json_value(),
        text in proptest::option::of("[a-z ]{1,20}"),
    ) {
        let tc = make_tool_call(&id, "", &serde_json::to_string(&args).unwrap());
        let resp = make_response(text, Some(vec![tc]), Some("tool_calls".to_string()));
        prop_assert!(test_helpers::normalize_response(resp).is_err());
    }

    #[test]
    fn prop_normalize_valid_json_roundtrips(
        id in "[a-z0-9]{5,15}",
        name in "[a-z_]{3,15}",
        value in arb_json_value(),
    ) {
        let tc = make_tool_call(&id, &name, &serde_json::to_string(&value).unwrap());
        let resp = make_response(None, Some(vec![tc]), Some("tool_calls".to_string()));

        let normalized = test_helpers::normalize_response(resp).unwrap();
        let uses = normalized.tool_uses();
        prop_assert_eq!(uses.len(), 1);
        prop_assert_eq!(uses[0].2, &value);
    }

    #[test]
    fn prop_normalize_rejects_invalid_json_args(
        id in "[a-z0-9]{5,15}",
        name in "[a-z_]{3,15}",
    ) {
        for invalid in ["{invalid", "not json at all", "{key: unquoted}", "[,]"] {
            let tc = make_tool_call(&id, &name, invalid);
            let resp = make_response(None, Some(vec![tc]), Some("tool_calls".to_string()));
            prop_assert!(
                test_helpers::normalize_response(resp).is_err(),
                "Expected error for invalid JSON args: {}",
                invalid
            );
        }
    }
}

// ============================================================================
// Message translation
// ============================================================================

proptest! {
    #[test]
    fn prop_translate_never_empty_output(msg in arb_message()) {
        prop_assert!(!test_helpers::translate_message(&msg).is_empty());
    }

    #[test]
    fn prop_translate_messages_have_content_or_tool_id(msg in arb_message()) {
        for m in &test_helpers::translate_message(&msg) {
            prop_assert!(
                m.content.is_some() || m.tool_calls.is_some() || m.tool_call_id.is_some(),
                "message has neither content, tool_calls, nor tool_call_id: role={}",
                m.role,
            );
        }
    }

    #[test]
    fn prop_translate_preserves_text(msg in arb_assistant_message()) {
        let messages = test_helpers::translate_message(&msg);
        let all_text: String = messages
            .iter()
            .filter_map(|m| m.content.as_deref())
            .collect();

        for block in &msg.content {
            if let ContentBlock::Text { text } = block {
                prop_assert!(all_text.contains(text.as_str()));
            }
        }
    }

    #[test]
    fn prop_translate_preserves_tool_use_count(msg in arb_assistant_message()) {
        let expected = msg
            .content
            .iter()
            .filter(|b| matches!(b, ContentBlock::ToolUse { .. }))
            .count();
        let translated: usize = test_helpers::translate_message(&msg)
            .iter()
            .filter_map(|m| m.tool_calls.as_ref())
            .map(|tcs| tcs.len())
            .sum();
        prop_assert_eq!(translated, expected);
    }

    #[test]
    fn prop_translate_tool_results_become_tool_role(msg in arb_user_message()) {
        let expected_ids: Vec<&str> = msg
            .content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolResult { tool_use_id, .. } => Some(tool_use_id.as_str()),
                _ => None,
            })
            .collect();

        let messages = test_helpers::translate_message(&msg);
        let tool_ids: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == "tool")
            .filter_map(|m| m.tool_call_id.as_deref())
            .collect();

        prop_assert_eq!(tool_ids, expected_ids);
    }

    #[test]
    fn prop_translated_message_serializes(msg in arb_message()) {
        for m in &test_helpers::translate_message(&msg) {
            prop_assert!(serde_json::to_value(m).is_ok());
        }
    }
}
