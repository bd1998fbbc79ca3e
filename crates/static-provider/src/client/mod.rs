//! Client for calling a running Static Provider
//!
//! Used by broker-side integration tests to call the provider directly.

use crate::contracts::HealthCheckResponse;
use ngsi_v1::{ErrorResponse, QueryContextResponse};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Static Provider client
pub struct StaticProviderClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl StaticProviderClient {
    /// Create new client
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: Duration::from_millis(1500),
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// GET /health
    pub async fn health(&self) -> Result<HealthCheckResponse, ClientError> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Self::parse(response).await
    }

    /// POST a queryContext body, optionally on the typed endpoint
    pub async fn query_context(
        &self,
        body: &Value,
        attr_type: Option<&str>,
    ) -> Result<QueryContextResponse, ClientError> {
        let url = match attr_type {
            Some(t) => format!("{}/v1/{}/queryContext", self.base_url, t),
            None => format!("{}/v1/queryContext", self.base_url),
        };

        let response = self
            .client
            .post(&url)
            .json(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| ClientError::Parse(e.to_string()))
        } else {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&error_text)
                .map(|e| e.error_code.reason_phrase)
                .unwrap_or(error_text);
            Err(ClientError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Client errors
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },
}
