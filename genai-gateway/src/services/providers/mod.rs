//! AI provider abstractions and implementations.
//!
//! Handlers only see the [`TextProvider`] trait, so the Gemini backend can be
//! swapped for the mock in tests.

pub mod gemini;
pub mod mock;

use crate::models::GenerationRequest;
use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send the request and return the provider's raw response document.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<serde_json::Value, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;
}
