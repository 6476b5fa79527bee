//! Pure state transition function
//!
//! Given the same state and event this always yields the same result; all
//! I/O happens in the runtime that executes the returned effects.

use super::{Effect, Event, TurnState};
use crate::conversation::Turn;
use crate::state_machine::state::ToolCall;
use thiserror::Error;

/// Reply used whenever the engine cannot produce one
pub const ENGINE_APOLOGY: &str =
    "Sorry, I'm having trouble processing your request right now. Please try again.";

/// Result of a state transition
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    pub new_state: TurnState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: TurnState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A turn is already in progress")]
    Busy,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

pub fn transition(state: &TurnState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // User input
        // ============================================================
        (TurnState::AwaitingInput | TurnState::Responded { .. }, Event::UserMessage { text }) => {
            Ok(TransitionResult::new(TurnState::Classifying {
                consulting_engine: false,
            })
            .with_effect(Effect::AppendUserTurn { text: text.clone() })
            .with_effect(Effect::Classify { utterance: text }))
        }

        (_, Event::UserMessage { .. }) => Err(TransitionError::Busy),

        // ============================================================
        // Classification
        // ============================================================
        (
            TurnState::Classifying {
                consulting_engine: false,
            },
            Event::IntentResolved { tool_call: None },
        ) => Ok(
            TransitionResult::new(TurnState::Synthesizing { tool_turns: vec![] })
                .with_effect(Effect::request_synthesis(vec![])),
        ),

        (
            TurnState::Classifying {
                consulting_engine: false,
            },
            Event::IntentResolved {
                tool_call: Some(call),
            },
        ) => Ok(start_fetching(call, vec![])),

        (
            TurnState::Classifying {
                consulting_engine: false,
            },
            Event::DelegateToEngine,
        ) => Ok(TransitionResult::new(TurnState::Classifying {
            consulting_engine: true,
        })
        .with_effect(Effect::request_with_tools())),

        // ============================================================
        // Engine chose (or declined) lookups
        // ============================================================
        (
            TurnState::Classifying {
                consulting_engine: true,
            },
            Event::EngineResponded {
                text, tool_calls, ..
            },
        ) => {
            let mut calls = tool_calls.into_iter();
            match calls.next() {
                Some(first) => Ok(start_fetching(first, calls.collect())),
                None => Ok(respond(vec![], reply_or(&text, ENGINE_APOLOGY))),
            }
        }

        (
            TurnState::Classifying {
                consulting_engine: true,
            },
            Event::EngineFailed { .. },
        ) => Ok(respond(vec![], ENGINE_APOLOGY.to_string())),

        // ============================================================
        // Lookups, strictly in issue order
        // ============================================================
        (
            TurnState::FetchingData {
                current,
                remaining,
                completed,
            },
            Event::ToolComplete {
                tool_use_id,
                outcome,
            },
        ) if tool_use_id == current.id => {
            let mut completed = completed.clone();
            completed.push(outcome.into_turn(current.reference()));

            match remaining.split_first() {
                Some((next, rest)) => Ok(TransitionResult::new(TurnState::FetchingData {
                    current: next.clone(),
                    remaining: rest.to_vec(),
                    completed,
                })
                .with_effect(Effect::fetch(next.clone()))),
                None => Ok(TransitionResult::new(TurnState::Synthesizing {
                    tool_turns: completed.clone(),
                })
                .with_effect(Effect::request_synthesis(completed))),
            }
        }

        // ============================================================
        // Synthesis
        // ============================================================
        (TurnState::Synthesizing { tool_turns }, Event::EngineResponded { text, .. }) => {
            let tool_text = tool_turns
                .iter()
                .map(Turn::content)
                .collect::<Vec<_>>()
                .join("\n\n");
            let fallback = reply_or(&tool_text, ENGINE_APOLOGY);
            Ok(respond(tool_turns.clone(), reply_or(&text, &fallback)))
        }

        (TurnState::Synthesizing { tool_turns }, Event::EngineFailed { .. }) => {
            Ok(respond(tool_turns.clone(), ENGINE_APOLOGY.to_string()))
        }

        // ============================================================
        // Abandonment: drop staged turns, commit nothing
        // ============================================================
        (TurnState::AwaitingInput | TurnState::Responded { .. }, Event::Abandon) => {
            Ok(TransitionResult::new(state.clone()))
        }

        (_, Event::Abandon) => Ok(TransitionResult::new(TurnState::AwaitingInput)),

        // ============================================================
        // Invalid Transitions
        // ============================================================
        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {} with event {event:?}",
            state.name()
        ))),
    }
}

fn start_fetching(first: ToolCall, remaining: Vec<ToolCall>) -> TransitionResult {
    TransitionResult::new(TurnState::FetchingData {
        current: first.clone(),
        remaining,
        completed: vec![],
    })
    .with_effect(Effect::fetch(first))
}

fn respond(tool_turns: Vec<Turn>, reply: String) -> TransitionResult {
    TransitionResult::new(TurnState::Responded {
        reply: reply.clone(),
    })
    .with_effect(Effect::commit(tool_turns, reply))
}

fn reply_or(text: &str, fallback: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
