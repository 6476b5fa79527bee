//! National Weather Service client
//!
//! Forecasts take two hops: `/points/{lat},{lon}` yields the grid's forecast
//! URL, which then yields the periods. Alerts are a single call keyed by
//! state code.

use super::{BackendError, WeatherBackend};
use crate::lookup::{AlertRequest, ForecastRequest, LookupRequest};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

pub const NWS_BASE_URL: &str = "https://api.weather.gov";

/// Periods included in a forecast reply
const FORECAST_PERIODS: usize = 5;

const NO_ALERTS: &str = "No active alerts for this state.";

pub struct NwsClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl NwsClient {
    pub fn new(
        user_agent: &str,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    async fn get_json(&self, url: &str, subject: &str) -> Result<Value, BackendError> {
        tracing::debug!(url, "NWS request");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/geo+json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout(self.timeout)
                } else {
                    BackendError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(classify_status(status, subject, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| BackendError::Network(format!("Failed to parse response: {e}")))
    }

    async fn forecast(&self, request: &ForecastRequest) -> Result<String, BackendError> {
        let coords = request.coordinates;
        let points_url = format!(
            "{}/points/{:.4},{:.4}",
            self.base_url,
            coords.latitude(),
            coords.longitude()
        );
        let points = self.get_json(&points_url, &request.label).await?;
        let forecast_url = forecast_url(&points)
            .ok_or_else(|| BackendError::NoData(request.label.clone()))?;

        let forecast = self.get_json(&forecast_url, &request.label).await?;
        format_forecast(&forecast).ok_or_else(|| BackendError::NoData(request.label.clone()))
    }

    async fn alerts(&self, request: &AlertRequest) -> Result<String, BackendError> {
        let url = format!(
            "{}/alerts/active/area/{}",
            self.base_url, request.region_code
        );
        let body = self.get_json(&url, request.region_code.as_str()).await?;
        format_alerts(&body).ok_or_else(|| BackendError::NoData(request.region_label.clone()))
    }
}

#[async_trait]
impl WeatherBackend for NwsClient {
    async fn fetch(&self, request: &LookupRequest) -> Result<String, BackendError> {
        match request {
            LookupRequest::Forecast(forecast) => self.forecast(forecast).await,
            LookupRequest::Alert(alert) => self.alerts(alert).await,
        }
    }
}

fn classify_status(status: StatusCode, subject: &str, body: &str) -> BackendError {
    // Problem documents carry a human-readable "detail"
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string());

    match status.as_u16() {
        404 => BackendError::NoData(subject.to_string()),
        400 | 422 => BackendError::InvalidParameter(detail),
        code => BackendError::Upstream {
            status: code,
            message: detail,
        },
    }
}

fn forecast_url(points: &Value) -> Option<String> {
    points
        .pointer("/properties/forecast")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn text_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

fn format_period(period: &Value) -> String {
    let temperature = period
        .get("temperature")
        .map_or_else(String::new, |t| match t {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            _ => String::new(),
        });

    format!(
        "{}:\nTemperature: {}°{}\nWind: {} {}\nForecast: {}",
        text_field(period, "name"),
        temperature,
        text_field(period, "temperatureUnit"),
        text_field(period, "windSpeed"),
        text_field(period, "windDirection"),
        text_field(period, "detailedForecast"),
    )
}

/// None when the payload has no periods
fn format_forecast(forecast: &Value) -> Option<String> {
    let periods = forecast.pointer("/properties/periods")?.as_array()?;
    if periods.is_empty() {
        return None;
    }
    Some(
        periods
            .iter()
            .take(FORECAST_PERIODS)
            .map(format_period)
            .collect::<Vec<_>>()
            .join("\n---\n"),
    )
}

fn format_alert(feature: &Value) -> String {
    let props = feature.get("properties").unwrap_or(&Value::Null);
    let instruction = match text_field(props, "instruction") {
        "" => "No specific instructions provided",
        text => text,
    };

    format!(
        "Event: {}\nArea: {}\nSeverity: {}\nDescription: {}\nInstructions: {}",
        text_field(props, "event"),
        text_field(props, "areaDesc"),
        text_field(props, "severity"),
        text_field(props, "description"),
        instruction,
    )
}

/// None when the payload is not a feature collection; an empty collection
/// is a valid "nothing active" answer
fn format_alerts(body: &Value) -> Option<String> {
    let features = body.get("features")?.as_array()?;
    if features.is_empty() {
        return Some(NO_ALERTS.to_string());
    }
    Some(
        features
            .iter()
            .map(format_alert)
            .collect::<Vec<_>>()
            .join("\n---\n"),
    )
}
