//! Property-based tests for the turn state machine

#![allow(clippy::single_match_else)]

use super::state::*;
use super::transition::*;
use super::*;
use crate::conversation::{Role, Turn};
use crate::llm::Usage;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_forecast_input() -> impl Strategy<Value = ForecastInput> {
    (-90.0f64..=90.0, -180.0f64..=180.0, "[A-Za-z ]{0,20}").prop_map(
        |(latitude, longitude, location_name)| ForecastInput {
            latitude,
            longitude,
            location_name,
        },
    )
}

fn arb_alerts_input() -> impl Strategy<Value = AlertsInput> {
    ("[A-Z]{2}", "[A-Za-z ]{0,20}").prop_map(|(state_code, state_name)| AlertsInput {
        state_code,
        state_name,
    })
}

fn arb_tool_input() -> impl Strategy<Value = ToolInput> {
    prop_oneof![
        arb_forecast_input().prop_map(ToolInput::Forecast),
        arb_alerts_input().prop_map(ToolInput::Alerts),
    ]
}

/// Calls with distinct ids, as the engine issues them
fn arb_tool_calls(max: usize) -> impl Strategy<Value = Vec<ToolCall>> {
    proptest::collection::vec(arb_tool_input(), 1..=max).prop_map(|inputs| {
        inputs
            .into_iter()
            .enumerate()
            .map(|(i, input)| ToolCall::new(format!("call_{i}"), input))
            .collect()
    })
}

fn arb_outcome() -> impl Strategy<Value = ToolOutcome> {
    ("[a-zA-Z0-9 :\n]{0,40}", any::<bool>()).prop_map(|(text, failed)| {
        if failed {
            ToolOutcome::failure(text)
        } else {
            ToolOutcome::success(text)
        }
    })
}

fn arb_busy_state() -> impl Strategy<Value = TurnState> {
    prop_oneof![
        any::<bool>().prop_map(|consulting_engine| TurnState::Classifying { consulting_engine }),
        arb_tool_calls(3).prop_map(|mut calls| {
            let current = calls.remove(0);
            TurnState::FetchingData {
                current,
                remaining: calls,
                completed: vec![],
            }
        }),
        Just(TurnState::Synthesizing { tool_turns: vec![] }),
    ]
}

fn arb_idle_state() -> impl Strategy<Value = TurnState> {
    prop_oneof![
        Just(TurnState::AwaitingInput),
        "[a-z ]{0,20}".prop_map(|reply| TurnState::Responded { reply }),
    ]
}

fn arb_any_state() -> impl Strategy<Value = TurnState> {
    prop_oneof![arb_idle_state(), arb_busy_state()]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        "[a-z ]{1,20}".prop_map(|text| Event::UserMessage { text }),
        Just(Event::Abandon),
        Just(Event::IntentResolved { tool_call: None }),
        Just(Event::DelegateToEngine),
        "[a-z ]{0,20}".prop_map(|text| Event::EngineResponded {
            text,
            tool_calls: vec![],
            usage: Usage::default(),
        }),
        "[a-z ]{1,20}".prop_map(|message| Event::EngineFailed { message }),
        ("call_[0-9]", arb_outcome()).prop_map(|(tool_use_id, outcome)| Event::ToolComplete {
            tool_use_id,
            outcome,
        }),
    ]
}

/// Drive a delegated turn whose engine asks for `calls`, then synthesizes
fn run_delegated_turn(
    calls: &[ToolCall],
    outcomes: &[ToolOutcome],
    synthesis: &str,
) -> Vec<Effect> {
    let mut effects = Vec::new();
    let mut state = TurnState::AwaitingInput;
    let mut step = |state: &mut TurnState, event: Event| {
        let result = transition(state, event).expect("valid transition");
        *state = result.new_state;
        effects.extend(result.effects);
    };

    step(&mut state, Event::UserMessage { text: "q".to_string() });
    step(&mut state, Event::DelegateToEngine);
    step(
        &mut state,
        Event::EngineResponded {
            text: String::new(),
            tool_calls: calls.to_vec(),
            usage: Usage::default(),
        },
    );
    for (call, outcome) in calls.iter().zip(outcomes) {
        step(
            &mut state,
            Event::ToolComplete {
                tool_use_id: call.id.clone(),
                outcome: outcome.clone(),
            },
        );
    }
    step(
        &mut state,
        Event::EngineResponded {
            text: synthesis.to_string(),
            tool_calls: vec![],
            usage: Usage::default(),
        },
    );
    assert!(matches!(state, TurnState::Responded { .. }));
    effects
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// A second utterance is never accepted while a turn is in flight
    #[test]
    fn prop_busy_rejects_user_message(state in arb_busy_state(), text in "[a-z]{1,10}") {
        let result = transition(&state, Event::UserMessage { text });
        prop_assert_eq!(result, Err(TransitionError::Busy));
    }

    /// Idle states always accept an utterance and record it first
    #[test]
    fn prop_idle_accepts_user_message(state in arb_idle_state(), text in "[a-z]{1,10}") {
        let result = transition(&state, Event::UserMessage { text: text.clone() }).unwrap();
        prop_assert_eq!(&result.effects[0], &Effect::AppendUserTurn { text });
    }

    /// Abandonment always returns to an idle state and commits nothing
    #[test]
    fn prop_abandon_commits_nothing(state in arb_any_state()) {
        let result = transition(&state, Event::Abandon).unwrap();
        prop_assert!(!result.new_state.is_busy());
        prop_assert!(result.effects.is_empty());
    }

    /// Same input, same output
    #[test]
    fn prop_transition_is_deterministic(state in arb_any_state(), event in arb_event()) {
        let first = transition(&state, event.clone());
        let second = transition(&state, event);
        prop_assert_eq!(first, second);
    }

    /// Every issued call is fetched, in order, even when some fail
    #[test]
    fn prop_all_calls_fetched_in_order(
        calls in arb_tool_calls(4),
        outcomes in proptest::collection::vec(arb_outcome(), 4),
    ) {
        let effects = run_delegated_turn(&calls, &outcomes, "done");
        let fetched: Vec<&ToolCall> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::FetchWeather { call } => Some(call),
                _ => None,
            })
            .collect();
        prop_assert_eq!(fetched, calls.iter().collect::<Vec<_>>());
    }

    /// Exactly one commit per turn; tool turns precede the reply and
    /// match the issued calls one for one
    #[test]
    fn prop_single_commit_with_ordered_tool_turns(
        calls in arb_tool_calls(4),
        outcomes in proptest::collection::vec(arb_outcome(), 4),
        synthesis in "[a-z ]{0,20}",
    ) {
        let effects = run_delegated_turn(&calls, &outcomes, &synthesis);
        let commits: Vec<(&Vec<Turn>, &String)> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::CommitExchange { tool_turns, reply } => Some((tool_turns, reply)),
                _ => None,
            })
            .collect();
        prop_assert_eq!(commits.len(), 1);

        let (tool_turns, reply) = commits[0];
        prop_assert!(!reply.is_empty());
        prop_assert_eq!(tool_turns.len(), calls.len());
        for ((turn, call), outcome) in tool_turns.iter().zip(&calls).zip(&outcomes) {
            prop_assert_eq!(turn.role(), Role::Tool);
            prop_assert_eq!(turn.content(), outcome.text.as_str());
            prop_assert_eq!(turn.is_error(), outcome.is_error);
            prop_assert_eq!(turn.tool_reference().map(|r| r.id.as_str()), Some(call.id.as_str()));
        }
    }

    /// The synthesis request never offers capabilities
    #[test]
    fn prop_synthesis_offers_no_tools(
        calls in arb_tool_calls(3),
        outcomes in proptest::collection::vec(arb_outcome(), 3),
    ) {
        let effects = run_delegated_turn(&calls, &outcomes, "ok");
        let offers: Vec<bool> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::RequestCompletion { offer_tools, .. } => Some(*offer_tools),
                _ => None,
            })
            .collect();
        prop_assert_eq!(offers, vec![true, false]);
    }
}
