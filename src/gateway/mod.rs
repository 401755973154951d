//! Generation gateway: one request/response cycle to the code-generation backend.
//!
//! The [`Gateway`] issues exactly one backend call per [`Gateway::generate`]
//! and never retries. Its result always carries the language the caller
//! selected; whatever language the backend echoes back is discarded.
//! Failures have no side effects.

pub mod http;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

pub use http::HttpBackend;

use crate::models::{GenerationRequest, GenerationResult, LanguageTag};

/// Errors from the generation backend.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The backend could not be reached or answered with a non-success status.
    #[error("generation backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend answered, but not with a `{ prompt, code, language? }` body.
    #[error("invalid response from generation backend: {0}")]
    InvalidResponse(String),
}

/// Success body returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendResponse {
    #[serde(default)]
    pub prompt: Option<String>,
    pub code: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// The external code-generation service
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<BackendResponse, GatewayError>;
}

#[derive(Clone)]
pub struct Gateway {
    backend: Arc<dyn GenerationBackend>,
}

impl Gateway {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    pub async fn generate(
        &self,
        prompt: &str,
        language: LanguageTag,
    ) -> Result<GenerationResult, GatewayError> {
        let request = GenerationRequest::new(prompt, language);
        debug!(language = %request.language, chars = prompt.chars().count(), "requesting generation");

        let response = self.backend.generate(&request).await.inspect_err(|e| {
            warn!("Generation request failed: {}", e);
        })?;

        if let Some(echoed) = response.language.as_deref()
            && echoed != request.language.as_str()
        {
            debug!(echoed, requested = %request.language, "ignoring backend language echo");
        }

        Ok(GenerationResult {
            prompt: response.prompt.unwrap_or(request.prompt),
            code: response.code,
            requested_language: request.language,
        })
    }
}
