//! Events that drive a turn forward

use crate::llm::Usage;
use crate::state_machine::state::{ToolCall, ToolOutcome};

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // User events
    UserMessage {
        text: String,
    },
    /// The caller walked away mid-turn (cancel or dropped future)
    Abandon,

    // Classification events
    /// Local rules decided; `None` means answer without a lookup
    IntentResolved {
        tool_call: Option<ToolCall>,
    },
    /// Policy leaves the lookup decision to the engine
    DelegateToEngine,

    // Engine events
    EngineResponded {
        text: String,
        tool_calls: Vec<ToolCall>,
        usage: Usage,
    },
    EngineFailed {
        message: String,
    },

    // Lookup events
    ToolComplete {
        tool_use_id: String,
        outcome: ToolOutcome,
    },
}
