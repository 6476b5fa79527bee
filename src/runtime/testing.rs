//! Mock implementations for testing
//!
//! These mocks enable loop testing without real I/O.

use super::traits::LlmClient;
use crate::llm::{ContentBlock, LlmError, LlmRequest, LlmResponse};
use crate::lookup::LookupRequest;
use crate::weather::{BackendError, WeatherBackend};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ============================================================================
// Mock LLM Client
// ============================================================================

/// A scripted engine reply
#[derive(Debug, Clone)]
pub enum MockReply {
    Fixed(Result<LlmResponse, LlmError>),
    /// Reply with the text of every tool result in the request
    EchoToolResults,
}

/// Mock LLM client that returns queued replies
pub struct MockLlmClient {
    replies: Mutex<VecDeque<MockReply>>,
    model_id: String,
    /// Record of all requests made
    pub requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmClient {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: LlmResponse) {
        self.queue(MockReply::Fixed(Ok(response)));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.queue(MockReply::Fixed(Err(error)));
    }

    pub fn queue_echo(&self) {
        self.queue(MockReply::EchoToolResults);
    }

    fn queue(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_reply(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Fixed(result)) => result,
            Some(MockReply::EchoToolResults) => Ok(LlmResponse::text_only(echo(request))),
            None => Err(LlmError::network("No mock response queued")),
        }
    }
}

fn echo(request: &LlmRequest) -> String {
    request
        .messages
        .iter()
        .flat_map(|m| &m.content)
        .filter_map(|block| match block {
            ContentBlock::ToolResult { content, .. } => Some(content.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.next_reply(request)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// ============================================================================
// Delayed Mock LLM Client (for timeout and cancellation testing)
// ============================================================================

/// Mock LLM client with configurable delay
pub struct DelayedMockLlmClient {
    inner: MockLlmClient,
    delay: Duration,
    /// Notified when request starts (for test synchronization)
    pub request_started: Arc<Notify>,
}

impl DelayedMockLlmClient {
    pub fn new(model_id: impl Into<String>, delay: Duration) -> Self {
        Self {
            inner: MockLlmClient::new(model_id),
            delay,
            request_started: Arc::new(Notify::new()),
        }
    }

    pub fn queue_response(&self, response: LlmResponse) {
        self.inner.queue_response(response);
    }

    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.inner.recorded_requests()
    }
}

#[async_trait]
impl LlmClient for DelayedMockLlmClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.inner.requests.lock().unwrap().push(request.clone());
        self.request_started.notify_one();
        tokio::time::sleep(self.delay).await;
        self.inner.next_reply(request)
    }

    fn model_id(&self) -> &str {
        self.inner.model_id()
    }
}

// ============================================================================
// Mock Weather Backend
// ============================================================================

/// Backend returning queued results, optionally after a delay
#[derive(Default)]
pub struct MockWeatherBackend {
    results: Mutex<VecDeque<Result<String, BackendError>>>,
    delay: Option<Duration>,
    /// Record of all fetches made
    pub requests: Mutex<Vec<LookupRequest>>,
}

impl MockWeatherBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn queue_text(&self, text: impl Into<String>) {
        self.results.lock().unwrap().push_back(Ok(text.into()));
    }

    pub fn queue_error(&self, error: BackendError) {
        self.results.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<LookupRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherBackend for MockWeatherBackend {
    async fn fetch(&self, request: &LookupRequest) -> Result<String, BackendError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::NoData("no mock result queued".to_string())))
    }
}
