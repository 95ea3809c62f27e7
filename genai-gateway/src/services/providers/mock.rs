//! Mock provider implementation for testing.

use super::{ProviderError, TextProvider};
use crate::models::GenerationRequest;
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock text provider for testing.
///
/// Answers with a Gemini-shaped document echoing the prompt, and counts how
/// often it was called.
pub struct MockTextProvider {
    failure: Option<String>,
    latency: Duration,
    calls: AtomicUsize,
}

impl MockTextProvider {
    pub fn new() -> Self {
        Self {
            failure: None,
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// A provider whose every call fails with an API error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Simulate provider round-trip time.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of `generate` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The text the mock answers `request` with.
    pub fn reply_for(request: &GenerationRequest) -> String {
        match request.blob() {
            Some(blob) => format!(
                "Mock response for: {} [{}, {} bytes]",
                request.prompt(),
                blob.mime_type,
                blob.decode().map(|b| b.len()).unwrap_or_default()
            ),
            None => format!("Mock response for: {}", request.prompt()),
        }
    }
}

impl Default for MockTextProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<serde_json::Value, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if let Some(message) = &self.failure {
            return Err(ProviderError::ApiError(message.clone()));
        }

        Ok(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": Self::reply_for(request) }]
                },
                "finishReason": "STOP"
            }]
        }))
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.failure {
            Some(message) => Err(ProviderError::NotConfigured(message.clone())),
            None => Ok(()),
        }
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}
