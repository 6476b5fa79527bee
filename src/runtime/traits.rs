//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the loop with mock implementations.

use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService};
use crate::lookup::LookupRequest;
use crate::weather::{BackendError, WeatherBackend};
use async_trait::async_trait;
use std::sync::Arc;

/// Client for making engine requests
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    fn model_id(&self) -> &str;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: LlmClient + ?Sized> LlmClient for Arc<T> {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        (**self).complete(request).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}

#[async_trait]
impl<T: WeatherBackend + ?Sized> WeatherBackend for Arc<T> {
    async fn fetch(&self, request: &LookupRequest) -> Result<String, BackendError> {
        (**self).fetch(request).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Adapter to use any [`LlmService`] as the loop's client
pub struct ServiceLlmClient {
    service: Arc<dyn LlmService>,
}

impl ServiceLlmClient {
    pub fn new(service: Arc<dyn LlmService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl LlmClient for ServiceLlmClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.service.complete(request).await
    }

    fn model_id(&self) -> &str {
        self.service.model_id()
    }
}
