//! Deciding whether an utterance needs a weather lookup
//!
//! Two interchangeable policies sit behind [`IntentPolicy`]: keyword rules
//! evaluated locally, or delegation of the whole decision to the engine.

use crate::gazetteer::LocationResolver;
use crate::llm::ToolDefinition;
use crate::lookup::{Capability, Coordinates, LookupError, LookupRequest, RegionCode};
use crate::state_machine::ToolCall;
use crate::system_prompt;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Word forms that signal a forecast request
pub const WEATHER_KEYWORDS: &[&str] = &[
    "weather",
    "temperature",
    "temperatures",
    "temp",
    "temps",
    "forecast",
    "forecasts",
    "rain",
    "rains",
    "rainy",
    "raining",
    "snow",
    "snowy",
    "snowing",
    "sunny",
    "cloudy",
    "hot",
    "cold",
    "storm",
    "storms",
    "stormy",
];

/// Word forms that signal an alert request
pub const ALERT_KEYWORDS: &[&str] = &[
    "alert",
    "alerts",
    "warning",
    "warnings",
    "watch",
    "watches",
    "advisory",
    "advisories",
    "severe",
    "emergency",
    "emergencies",
    "danger",
    "dangerous",
    "storm",
    "storms",
    "stormy",
];

/// Classification of one utterance
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    None,
    Alert {
        region_code: RegionCode,
        region_label: String,
    },
    Forecast {
        label: String,
        coordinates: Coordinates,
    },
}

impl Intent {
    pub fn lookup_request(&self) -> Option<LookupRequest> {
        match self {
            Intent::None => None,
            Intent::Alert {
                region_code,
                region_label,
            } => Some(LookupRequest::alert(region_code.clone(), region_label.clone())),
            Intent::Forecast { label, coordinates } => {
                Some(LookupRequest::forecast(label.clone(), *coordinates))
            }
        }
    }
}

/// True when some whole word of `text` is one of `keywords`; "hotel" and
/// "watching" are not mentions of "hot" or "watch"
fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|word| keywords.contains(&word))
}

/// Keyword-and-gazetteer rules
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    resolver: LocationResolver,
}

impl KeywordClassifier {
    pub fn new(resolver: LocationResolver) -> Self {
        Self { resolver }
    }

    /// Alert words take priority. An alert word without a resolvable
    /// region yields no lookup at all.
    pub fn classify(&self, utterance: &str) -> Intent {
        let text = utterance.to_lowercase();

        if mentions_any(&text, ALERT_KEYWORDS) {
            return match self.resolver.resolve_region(utterance) {
                Some(region) => Intent::Alert {
                    region_code: region.code,
                    region_label: region.label,
                },
                None => Intent::None,
            };
        }

        if mentions_any(&text, WEATHER_KEYWORDS) {
            if let Some(place) = self.resolver.resolve_place(utterance) {
                return Intent::Forecast {
                    label: place.label,
                    coordinates: place.coordinates,
                };
            }
        }

        Intent::None
    }
}

/// What a policy decided for one utterance
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Decided locally
    Local(Intent),
    /// Let the engine decide, with capabilities offered
    Delegate,
}

/// Pluggable intent strategy
pub trait IntentPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    fn select(&self, utterance: &str) -> Selection;

    /// Capabilities offered on the first engine call
    fn declared_tools(&self) -> Vec<ToolDefinition>;

    fn system_prompt(&self) -> &'static str;

    /// Validate an invocation into backend parameters
    fn dispatch(&self, call: &ToolCall) -> Result<LookupRequest, LookupError> {
        call.input.to_lookup_request()
    }
}

/// Keyword rules decide; the engine only ever writes the reply
#[derive(Debug, Clone)]
pub struct KeywordPolicy {
    classifier: KeywordClassifier,
}

impl KeywordPolicy {
    pub fn new(resolver: LocationResolver) -> Self {
        Self {
            classifier: KeywordClassifier::new(resolver),
        }
    }
}

impl IntentPolicy for KeywordPolicy {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn select(&self, utterance: &str) -> Selection {
        Selection::Local(self.classifier.classify(utterance))
    }

    fn declared_tools(&self) -> Vec<ToolDefinition> {
        Vec::new()
    }

    fn system_prompt(&self) -> &'static str {
        system_prompt::KEYWORD_PROMPT
    }
}

/// The engine chooses capabilities and resolves locations itself
#[derive(Debug, Clone, Copy, Default)]
pub struct DelegatedPolicy;

impl IntentPolicy for DelegatedPolicy {
    fn name(&self) -> &'static str {
        "delegated"
    }

    fn select(&self, _utterance: &str) -> Selection {
        Selection::Delegate
    }

    fn declared_tools(&self) -> Vec<ToolDefinition> {
        Capability::definitions()
    }

    fn system_prompt(&self) -> &'static str {
        system_prompt::DELEGATED_PROMPT
    }
}

/// Which policy a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    Keyword,
    Delegated,
}

impl Strategy {
    pub fn into_policy(self, resolver: LocationResolver) -> Arc<dyn IntentPolicy> {
        match self {
            Strategy::Keyword => Arc::new(KeywordPolicy::new(resolver)),
            Strategy::Delegated => Arc::new(DelegatedPolicy),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyword" | "keywords" => Ok(Strategy::Keyword),
            "delegated" | "delegate" | "smart" => Ok(Strategy::Delegated),
            other => Err(format!("unknown strategy {other:?} (expected keyword or delegated)")),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Keyword => "keyword",
            Strategy::Delegated => "delegated",
        })
    }
}
