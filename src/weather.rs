//! Weather data backend
//!
//! The loop only sees [`WeatherBackend`]: validated parameters in,
//! formatted text or a typed failure out.

mod nws;

pub use nws::{NwsClient, NWS_BASE_URL};

use crate::lookup::LookupRequest;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("network error: {0}")]
    Network(String),
    #[error("no response within {0:?}")]
    Timeout(Duration),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("no weather data available for {0}")]
    NoData(String),
    #[error("weather service returned {status}: {message}")]
    Upstream { status: u16, message: String },
}

/// Source of formatted weather text
#[async_trait]
pub trait WeatherBackend: Send + Sync {
    async fn fetch(&self, request: &LookupRequest) -> Result<String, BackendError>;
}
