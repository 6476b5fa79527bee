//! Environment configuration
//!
//! Everything is read once at startup. A missing credential or malformed
//! value aborts before any session begins.

use crate::intent::Strategy;
use crate::llm::DEFAULT_BASE_URL;
use crate::runtime::LoopSettings;
use crate::weather::NWS_BASE_URL;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_USER_AGENT: &str = "weather-agent/0.1";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set; add it to the environment or a .env file")]
    MissingCredential(&'static str),
    #[error("invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub strategy: Strategy,
    pub weather_base_url: String,
    pub user_agent: String,
    pub settings: LoopSettings,
}

impl AgentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = var("GROQ_API_KEY").ok_or(ConfigError::MissingCredential("GROQ_API_KEY"))?;

        let history_window: usize = parse_or(&var, "WEATHER_AGENT_HISTORY_WINDOW", 10)?;
        if history_window == 0 {
            return Err(ConfigError::InvalidValue {
                name: "WEATHER_AGENT_HISTORY_WINDOW",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let temperature: f32 = parse_or(&var, "WEATHER_AGENT_TEMPERATURE", 0.7)?;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidValue {
                name: "WEATHER_AGENT_TEMPERATURE",
                value: temperature.to_string(),
                reason: "must be between 0 and 2".to_string(),
            });
        }

        let settings = LoopSettings {
            engine_timeout: Duration::from_secs(positive_secs(
                &var,
                "WEATHER_AGENT_ENGINE_TIMEOUT_SECS",
            )?),
            backend_timeout: Duration::from_secs(positive_secs(
                &var,
                "WEATHER_AGENT_BACKEND_TIMEOUT_SECS",
            )?),
            max_tokens: Some(parse_or(&var, "WEATHER_AGENT_MAX_TOKENS", 1000)?),
            temperature: Some(temperature),
            history_window,
        };

        Ok(Self {
            api_key,
            base_url: var("WEATHER_AGENT_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: var("WEATHER_AGENT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            strategy: parse_or(&var, "WEATHER_AGENT_STRATEGY", Strategy::default())?,
            weather_base_url: var("NWS_BASE_URL").unwrap_or_else(|| NWS_BASE_URL.to_string()),
            user_agent: var("NWS_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            settings,
        })
    }
}

fn parse_or<T, F>(var: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn positive_secs<F>(var: &F, name: &'static str) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs: u64 = parse_or(var, name, 30)?;
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            name,
            value: "0".to_string(),
            reason: "timeouts must be at least one second".to_string(),
        });
    }
    Ok(secs)
}
