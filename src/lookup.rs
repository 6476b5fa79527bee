//! Validated weather lookup parameters and the capabilities behind them
//!
//! A `LookupRequest` can only be built from parameters that passed range
//! and shape checks, so the backend never sees a half-resolved query.

use crate::llm::ToolDefinition;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use thiserror::Error;

/// Validation failures for lookup parameters
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("region code {0:?} is not a two-letter code")]
    InvalidRegionCode(String),
}

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LookupError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(LookupError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(LookupError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(self) -> f64 {
        self.latitude
    }

    pub fn longitude(self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Short canonical region code, e.g. `CA`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionCode(String);

impl RegionCode {
    pub fn new(code: &str) -> Result<Self, LookupError> {
        let code = code.trim();
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(code.to_ascii_uppercase()))
        } else {
            Err(LookupError::InvalidRegionCode(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RegionCode {
    type Error = LookupError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<RegionCode> for String {
    fn from(code: RegionCode) -> Self {
        code.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Forecast for a point; `label` is presentation only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub coordinates: Coordinates,
    pub label: String,
}

/// Active alerts for a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRequest {
    pub region_code: RegionCode,
    pub region_label: String,
}

/// Validated parameters for one weather-backend query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LookupRequest {
    Forecast(ForecastRequest),
    Alert(AlertRequest),
}

impl LookupRequest {
    pub fn forecast(label: impl Into<String>, coordinates: Coordinates) -> Self {
        let label = label.into();
        let label = if label.trim().is_empty() {
            coordinates.to_string()
        } else {
            label
        };
        LookupRequest::Forecast(ForecastRequest { coordinates, label })
    }

    pub fn alert(region_code: RegionCode, region_label: impl Into<String>) -> Self {
        let region_label = region_label.into();
        let region_label = if region_label.trim().is_empty() {
            region_code.to_string()
        } else {
            region_label
        };
        LookupRequest::Alert(AlertRequest {
            region_code,
            region_label,
        })
    }

    /// Capability that serves this request
    pub fn capability(&self) -> Capability {
        match self {
            LookupRequest::Forecast(_) => Capability::Forecast,
            LookupRequest::Alert(_) => Capability::Alerts,
        }
    }

    /// Heading placed above backend text before it reaches the engine
    pub fn frame_result(&self, text: &str) -> String {
        match self {
            LookupRequest::Forecast(f) => format!("Weather forecast for {}:\n{text}", f.label),
            LookupRequest::Alert(a) => format!(
                "Weather alerts for {} ({}):\n{text}",
                a.region_label, a.region_code
            ),
        }
    }
}

/// The fixed set of capabilities the engine may invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Forecast,
    Alerts,
}

impl Capability {
    pub const ALL: [Capability; 2] = [Capability::Forecast, Capability::Alerts];

    pub fn name(self) -> &'static str {
        match self {
            Capability::Forecast => "get_weather_forecast",
            Capability::Alerts => "get_weather_alerts",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            Capability::Forecast => {
                "Get weather forecast for any US location using latitude and longitude coordinates"
            }
            Capability::Alerts => "Get weather alerts and warnings for a US state",
        }
    }

    pub fn input_schema(self) -> Value {
        match self {
            Capability::Forecast => json!({
                "type": "object",
                "required": ["latitude", "longitude", "location_name"],
                "properties": {
                    "latitude": {
                        "type": "number",
                        "description": "Latitude coordinate of the location"
                    },
                    "longitude": {
                        "type": "number",
                        "description": "Longitude coordinate of the location"
                    },
                    "location_name": {
                        "type": "string",
                        "description": "Human-readable name of the location"
                    }
                }
            }),
            Capability::Alerts => json!({
                "type": "object",
                "required": ["state_code", "state_name"],
                "properties": {
                    "state_code": {
                        "type": "string",
                        "description": "Two-letter US state code (e.g., CA, TX, NY)"
                    },
                    "state_name": {
                        "type": "string",
                        "description": "Full name of the state"
                    }
                }
            }),
        }
    }

    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }

    /// Schema declared to the engine for delegated tool selection
    pub fn definitions() -> Vec<ToolDefinition> {
        Self::ALL.into_iter().map(Capability::definition).collect()
    }
}
