//! Session transcript and the bounded window shown to the engine

use crate::llm::{ContentBlock, LlmMessage, MessageRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    Tool,
}

/// The capability invocation a tool turn answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolReference {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// One immutable exchange unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_reference: Option<ToolReference>,
    /// Set on tool turns whose lookup failed
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    is_error: bool,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            tool_reference: None,
            is_error: false,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_reference: None,
            is_error: false,
        }
    }

    pub fn tool(reference: ToolReference, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_reference: Some(reference),
            is_error: false,
        }
    }

    /// Tool turn carrying a failed lookup's apology
    pub fn tool_error(reference: ToolReference, content: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::tool(reference, content)
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tool_reference(&self) -> Option<&ToolReference> {
        self.tool_reference.as_ref()
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

/// Append-only transcript for one session
#[derive(Debug, Clone)]
pub struct ConversationState {
    session_id: String,
    started_at: DateTime<Utc>,
    turns: Vec<Turn>,
    window: usize,
}

impl ConversationState {
    /// `window` is clamped to at least one turn
    pub fn new(window: usize) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            turns: Vec::new(),
            window: window.max(1),
        }
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Append a turn's tool results followed by its reply, in that order
    pub fn commit_exchange(&mut self, tool_turns: Vec<Turn>, reply: Turn) {
        debug_assert!(tool_turns.iter().all(|t| t.role == Role::Tool));
        debug_assert_eq!(reply.role, Role::Assistant);
        self.turns.extend(tool_turns);
        self.turns.push(reply);
    }

    /// The most recent `window` turns
    pub fn window_view(&self) -> &[Turn] {
        let start = self.turns.len().saturating_sub(self.window);
        &self.turns[start..]
    }

    /// Committed turns followed by `staged`, cut to the most recent
    /// `window` turns of the combined sequence
    pub fn window_view_with(&self, staged: &[Turn]) -> Vec<Turn> {
        let mut view: Vec<Turn> = self.window_view().iter().chain(staged).cloned().collect();
        let excess = view.len().saturating_sub(self.window);
        view.drain(..excess);
        view
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

/// Project turns onto engine messages.
///
/// A run of consecutive tool turns becomes one assistant message carrying
/// the invocations, then one user message carrying their results.
pub fn to_llm_messages(turns: &[Turn]) -> Vec<LlmMessage> {
    let mut messages = Vec::new();
    let mut calls = Vec::new();
    let mut results = Vec::new();

    for turn in turns {
        if let (Role::Tool, Some(reference)) = (turn.role, turn.tool_reference()) {
            calls.push(ContentBlock::tool_use(
                reference.id.clone(),
                reference.name.clone(),
                reference.arguments.clone(),
            ));
            results.push(ContentBlock::tool_result(
                reference.id.clone(),
                turn.content.clone(),
                turn.is_error,
            ));
            continue;
        }

        flush_tool_run(&mut messages, &mut calls, &mut results);
        match turn.role {
            Role::User => messages.push(LlmMessage::user_text(turn.content.clone())),
            Role::Assistant => messages.push(LlmMessage::assistant_text(turn.content.clone())),
            Role::Tool => {
                tracing::warn!("Skipping tool turn without a reference");
            }
        }
    }
    flush_tool_run(&mut messages, &mut calls, &mut results);

    messages
}

fn flush_tool_run(
    messages: &mut Vec<LlmMessage>,
    calls: &mut Vec<ContentBlock>,
    results: &mut Vec<ContentBlock>,
) {
    if calls.is_empty() {
        return;
    }
    messages.push(LlmMessage {
        role: MessageRole::Assistant,
        content: std::mem::take(calls),
    });
    messages.push(LlmMessage {
        role: MessageRole::User,
        content: std::mem::take(results),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn reference(id: &str) -> ToolReference {
        ToolReference {
            id: id.to_string(),
            name: "get_weather_alerts".to_string(),
            arguments: json!({"state_code": "CA", "state_name": "California"}),
        }
    }

    #[test]
    fn test_commit_exchange_orders_tools_before_reply() {
        let mut state = ConversationState::new(10);
        state.push(Turn::user("alerts for California"));
        state.commit_exchange(
            vec![Turn::tool(reference("a"), "No active alerts")],
            Turn::assistant("All clear."),
        );
        let roles: Vec<Role> = state.turns().iter().map(Turn::role).collect();
        assert_eq!(roles, vec![Role::User, Role::Tool, Role::Assistant]);
    }

    #[test]
    fn test_window_clamped_to_one() {
        let mut state = ConversationState::new(0);
        state.push(Turn::user("a"));
        state.push(Turn::user("b"));
        assert_eq!(state.window(), 1);
        assert_eq!(state.window_view(), &[Turn::user("b")]);
    }

    #[test]
    fn test_projection_groups_tool_runs() {
        let turns = vec![
            Turn::user("alerts in TX and CA"),
            Turn::tool(reference("a"), "Weather alerts for Texas (TX):\nFlood Watch"),
            Turn::tool(reference("b"), "Weather alerts for California (CA):\nNone"),
            Turn::assistant("Texas has a flood watch."),
        ];
        let messages = to_llm_messages(&turns);
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].content.len(), 2);
        assert!(matches!(
            &messages[2].content[1],
            ContentBlock::ToolResult { tool_use_id, .. } if tool_use_id == "b"
        ));
        assert_eq!(messages[3], LlmMessage::assistant_text("Texas has a flood watch."));
    }

    #[test]
    fn test_staged_turns_count_against_window() {
        let mut state = ConversationState::new(2);
        state.push(Turn::user("hello"));
        state.push(Turn::assistant("Hi!"));
        state.push(Turn::user("alerts for California"));

        let staged = vec![Turn::tool(reference("a"), "No active alerts")];
        let view = state.window_view_with(&staged);
        assert_eq!(
            view,
            vec![Turn::user("alerts for California"), staged[0].clone()]
        );

        let many: Vec<Turn> = ["a", "b", "c"]
            .iter()
            .map(|id| Turn::tool(reference(id), *id))
            .collect();
        assert_eq!(state.window_view_with(&many), many[1..].to_vec());
        assert_eq!(state.window_view_with(&[]), state.window_view().to_vec());
    }

    #[test]
    fn test_failed_tool_turn_projects_error_flag() {
        let turns = vec![
            Turn::user("weather in Sacramento"),
            Turn::tool_error(reference("a"), "Sorry, I couldn't fetch the weather data"),
            Turn::tool(reference("b"), "Weather alerts for California (CA):\nNone"),
        ];
        let flags: Vec<bool> = to_llm_messages(&turns)
            .iter()
            .flat_map(|m| m.content.iter())
            .filter_map(|b| match b {
                ContentBlock::ToolResult { is_error, .. } => Some(*is_error),
                _ => None,
            })
            .collect();
        assert_eq!(flags, vec![true, false]);
        assert!(turns[1].is_error());
    }

    #[test]
    fn test_turn_serializes_without_empty_reference() {
        let value = serde_json::to_value(Turn::user("hi")).unwrap();
        assert_eq!(value, json!({"role": "user", "content": "hi"}));
    }

    fn arb_turn() -> impl Strategy<Value = Turn> {
        prop_oneof![
            "[a-z ]{0,20}".prop_map(Turn::user),
            "[a-z ]{0,20}".prop_map(Turn::assistant),
            ("[a-z0-9]{4}", "[a-z ]{0,20}").prop_map(|(id, text)| Turn::tool(reference(&id), text)),
        ]
    }

    proptest! {
        /// The view never exceeds the window and is always the newest suffix
        #[test]
        fn prop_window_is_bounded_suffix(
            window in 1usize..15,
            turns in proptest::collection::vec(arb_turn(), 0..40),
        ) {
            let mut state = ConversationState::new(window);
            for turn in turns.iter().cloned() {
                state.push(turn);
            }
            let view = state.window_view();
            prop_assert!(view.len() <= window);
            prop_assert_eq!(view.len(), turns.len().min(window));
            prop_assert_eq!(view, &turns[turns.len() - view.len()..]);
        }

        /// Staged turns never push the combined view past the window
        #[test]
        fn prop_view_with_staged_is_bounded_suffix(
            window in 1usize..10,
            committed in proptest::collection::vec(arb_turn(), 0..20),
            staged in proptest::collection::vec(arb_turn(), 0..6),
        ) {
            let mut state = ConversationState::new(window);
            for turn in committed.iter().cloned() {
                state.push(turn);
            }
            let combined: Vec<Turn> = committed.iter().chain(&staged).cloned().collect();
            let view = state.window_view_with(&staged);
            prop_assert!(view.len() <= window);
            prop_assert_eq!(&view[..], &combined[combined.len() - view.len()..]);
            prop_assert_eq!(view.len(), combined.len().min(window));
        }

        /// Every tool turn survives projection as a result block
        #[test]
        fn prop_projection_keeps_tool_results(
            turns in proptest::collection::vec(arb_turn(), 0..30),
        ) {
            let tool_turns = turns.iter().filter(|t| t.role() == Role::Tool).count();
            let results: usize = to_llm_messages(&turns)
                .iter()
                .flat_map(|m| m.content.iter())
                .filter(|b| matches!(b, ContentBlock::ToolResult { .. }))
                .count();
            prop_assert_eq!(results, tool_turns);
        }
    }
}
