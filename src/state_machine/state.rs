//! Turn state types

use crate::conversation::{ToolReference, Turn};
use crate::lookup::{Capability, Coordinates, LookupError, LookupRequest, RegionCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// Tool Input Types - Strongly typed inputs for each capability
// ============================================================================

/// Input for `get_weather_forecast`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastInput {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub location_name: String,
}

/// Input for `get_weather_alerts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertsInput {
    pub state_code: String,
    #[serde(default)]
    pub state_name: String,
}

/// Why an engine-issued invocation could not be accepted
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolCallError {
    #[error("unknown capability: {0}")]
    UnknownCapability(String),
    #[error("invalid arguments for {name}: {message}")]
    InvalidArguments { name: String, message: String },
}

/// Strongly typed tool input enum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_tool", rename_all = "snake_case")]
pub enum ToolInput {
    Forecast(ForecastInput),
    Alerts(AlertsInput),
}

impl ToolInput {
    pub fn capability(&self) -> Capability {
        match self {
            ToolInput::Forecast(_) => Capability::Forecast,
            ToolInput::Alerts(_) => Capability::Alerts,
        }
    }

    pub fn tool_name(&self) -> &'static str {
        self.capability().name()
    }

    /// Arguments as they appear on the wire
    pub fn to_value(&self) -> Value {
        match self {
            ToolInput::Forecast(input) => serde_json::to_value(input).unwrap_or(Value::Null),
            ToolInput::Alerts(input) => serde_json::to_value(input).unwrap_or(Value::Null),
        }
    }

    /// Parse from capability name and JSON arguments
    pub fn from_name_and_value(name: &str, value: Value) -> Result<Self, ToolCallError> {
        let capability = Capability::from_name(name)
            .ok_or_else(|| ToolCallError::UnknownCapability(name.to_string()))?;
        let invalid = |e: serde_json::Error| ToolCallError::InvalidArguments {
            name: name.to_string(),
            message: e.to_string(),
        };
        match capability {
            Capability::Forecast => serde_json::from_value(value)
                .map(ToolInput::Forecast)
                .map_err(invalid),
            Capability::Alerts => serde_json::from_value(value)
                .map(ToolInput::Alerts)
                .map_err(invalid),
        }
    }

    /// Validate into backend parameters
    pub fn to_lookup_request(&self) -> Result<LookupRequest, LookupError> {
        match self {
            ToolInput::Forecast(input) => {
                let coordinates = Coordinates::new(input.latitude, input.longitude)?;
                Ok(LookupRequest::forecast(
                    input.location_name.clone(),
                    coordinates,
                ))
            }
            ToolInput::Alerts(input) => {
                let code = RegionCode::new(&input.state_code)?;
                Ok(LookupRequest::alert(code, input.state_name.clone()))
            }
        }
    }
}

impl From<&LookupRequest> for ToolInput {
    fn from(request: &LookupRequest) -> Self {
        match request {
            LookupRequest::Forecast(f) => ToolInput::Forecast(ForecastInput {
                latitude: f.coordinates.latitude(),
                longitude: f.coordinates.longitude(),
                location_name: f.label.clone(),
            }),
            LookupRequest::Alert(a) => ToolInput::Alerts(AlertsInput {
                state_code: a.region_code.to_string(),
                state_name: a.region_label.clone(),
            }),
        }
    }
}

// ============================================================================
// Tool Call - An invocation with ID and typed input
// ============================================================================

/// A capability invocation, either engine-issued or synthesized locally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub input: ToolInput,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, input: ToolInput) -> Self {
        Self {
            id: id.into(),
            input,
        }
    }

    pub fn name(&self) -> &'static str {
        self.input.tool_name()
    }

    pub fn reference(&self) -> ToolReference {
        ToolReference {
            id: self.id.clone(),
            name: self.name().to_string(),
            arguments: self.input.to_value(),
        }
    }
}

/// Text produced for one invocation; failures carry an apology, not an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutcome {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    /// Tool turn answering `reference`, keeping the failure flag
    pub fn into_turn(self, reference: ToolReference) -> Turn {
        if self.is_error {
            Turn::tool_error(reference, self.text)
        } else {
            Turn::tool(reference, self.text)
        }
    }
}

// ============================================================================
// Turn State
// ============================================================================

/// Where the current user turn stands
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnState {
    /// Ready for the next utterance
    #[default]
    AwaitingInput,

    /// Deciding whether a lookup is needed; `consulting_engine` once the
    /// decision has been handed to the engine
    Classifying { consulting_engine: bool },

    /// Running lookups one at a time
    FetchingData {
        current: ToolCall,
        remaining: Vec<ToolCall>,
        /// Tool turns produced so far, not yet committed
        completed: Vec<Turn>,
    },

    /// Final engine pass in flight, no capabilities offered
    Synthesizing { tool_turns: Vec<Turn> },

    /// Reply committed
    Responded { reply: String },
}

impl TurnState {
    /// A turn is underway and another utterance would be rejected
    pub fn is_busy(&self) -> bool {
        !matches!(
            self,
            TurnState::AwaitingInput | TurnState::Responded { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            TurnState::AwaitingInput => "awaiting_input",
            TurnState::Classifying { .. } => "classifying",
            TurnState::FetchingData { .. } => "fetching_data",
            TurnState::Synthesizing { .. } => "synthesizing",
            TurnState::Responded { .. } => "responded",
        }
    }
}
