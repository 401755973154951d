//! HTTP client for the generation backend.
//!
//! Sends `POST {base_url}/generate` with `{"prompt", "language"}` and expects
//! `{"prompt"?, "code", "language"?}` back.

use std::time::Duration;

use async_trait::async_trait;

use super::{BackendResponse, GatewayError, GenerationBackend};
use crate::models::GenerationRequest;

/// Longest slice of an error body carried into an error message
const MAX_ERROR_BODY_CHARS: usize = 200;

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for the backend at `base_url`, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::BackendUnavailable(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Reuse an existing [`reqwest::Client`]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/generate", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<BackendResponse, GatewayError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::BackendUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(GatewayError::BackendUnavailable(format!("status {}: {}", status.as_u16(), body)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::BackendUnavailable(e.to_string()))?;

        parse_response_body(&bytes)
    }
}

/// Decode a success body into a [`BackendResponse`]
pub fn parse_response_body(body: &[u8]) -> Result<BackendResponse, GatewayError> {
    serde_json::from_slice(body).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
}
