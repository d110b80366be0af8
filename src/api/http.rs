//! InsightX REST client
//!
//! reqwest-based implementation of [`QaClient`] and [`DashboardSource`].
//! One attempt per call: no retries, no backoff.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::{
    endpoint_url, AskRequest, AskResponse, ClearRequest, DashboardSource, FailureBreakdown,
    HealthResponse, QaClient, Summary, Trends, ASK_PATH, CLEAR_PATH, DEFAULT_BASE_URL,
    FAILURES_PATH, SUMMARY_PATH, TRENDS_PATH,
};
use crate::error::{ClientError, ClientResult};
use crate::session::SessionId;

/// Endpoint configuration for [`HttpClient`]
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL of the question-answering service
    pub qa_url: String,
    /// Base URL of the aggregate endpoints
    pub dashboard_url: String,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            qa_url: DEFAULT_BASE_URL.to_string(),
            dashboard_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

/// HTTP client for both backend roles
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a client with the given configuration
    pub fn new(config: HttpClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| ClientError::Request(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Probe the QA service root
    pub async fn health(&self) -> ClientResult<HealthResponse> {
        let url = endpoint_url(&self.config.qa_url, "/");
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = endpoint_url(&self.config.dashboard_url, path);
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await?;
        decode(response).await
    }
}

/// Map a non-2xx status to [`ClientError::Status`], otherwise parse the body
async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[async_trait(?Send)]
impl QaClient for HttpClient {
    async fn ask(&self, request: &AskRequest) -> ClientResult<AskResponse> {
        let url = endpoint_url(&self.config.qa_url, ASK_PATH);
        tracing::debug!(url = %url, session_id = %request.session_id, "Asking question");

        let response = self.client.post(&url).json(request).send().await?;
        decode(response).await
    }

    async fn clear_session(&self, session_id: &SessionId) -> ClientResult<()> {
        let url = endpoint_url(&self.config.qa_url, CLEAR_PATH);
        let body = ClearRequest {
            session_id: session_id.clone(),
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait(?Send)]
impl DashboardSource for HttpClient {
    async fn summary(&self) -> ClientResult<Summary> {
        self.get_json(SUMMARY_PATH).await
    }

    async fn failures(&self) -> ClientResult<FailureBreakdown> {
        self.get_json(FAILURES_PATH).await
    }

    async fn trends(&self) -> ClientResult<Trends> {
        self.get_json(TRENDS_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert_eq!(config.qa_url, "http://localhost:8000");
        assert_eq!(config.dashboard_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_ms, 30_000);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_client_error() {
        let client = HttpClient::new(HttpClientConfig {
            // Port 9 (discard) is closed on test machines
            qa_url: "http://127.0.0.1:9".to_string(),
            dashboard_url: "http://127.0.0.1:9".to_string(),
            request_timeout_ms: 2_000,
        })
        .unwrap();

        assert!(client.summary().await.is_err());
    }
}
