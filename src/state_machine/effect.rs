//! Effects produced by state transitions

use crate::conversation::Turn;
use crate::state_machine::state::ToolCall;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Record the utterance in the transcript
    AppendUserTurn { text: String },

    /// Run the active intent policy over the utterance
    Classify { utterance: String },

    /// Ask the engine for a completion over the window plus `staged` turns
    RequestCompletion { offer_tools: bool, staged: Vec<Turn> },

    /// Dispatch one lookup to the weather backend
    FetchWeather { call: ToolCall },

    /// Append tool turns then the reply, atomically
    CommitExchange { tool_turns: Vec<Turn>, reply: String },
}

impl Effect {
    pub fn request_with_tools() -> Self {
        Effect::RequestCompletion {
            offer_tools: true,
            staged: vec![],
        }
    }

    pub fn request_synthesis(staged: Vec<Turn>) -> Self {
        Effect::RequestCompletion {
            offer_tools: false,
            staged,
        }
    }

    pub fn fetch(call: ToolCall) -> Self {
        Effect::FetchWeather { call }
    }

    pub fn commit(tool_turns: Vec<Turn>, reply: impl Into<String>) -> Self {
        Effect::CommitExchange {
            tool_turns,
            reply: reply.into(),
        }
    }
}
