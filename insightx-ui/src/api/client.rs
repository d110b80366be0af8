//! HTTP API Client
//!
//! gloo-net implementation of [`QaClient`] and [`DashboardSource`].

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use insightx::api::{
    endpoint_url, AskRequest, AskResponse, ClearRequest, DashboardSource, FailureBreakdown,
    QaClient, Summary, Trends, ASK_PATH, CLEAR_PATH, DEFAULT_BASE_URL, FAILURES_PATH,
    SUMMARY_PATH, TRENDS_PATH,
};
use insightx::error::{ClientError, ClientResult};
use insightx::SessionId;

/// localStorage key overriding the QA endpoint
pub const QA_URL_KEY: &str = "insightx_qa_url";

/// localStorage key overriding the dashboard endpoint
pub const API_URL_KEY: &str = "insightx_api_url";

/// Pick an endpoint: stored override, then build-time value, then default
fn resolve_base(stored: Option<String>, build_time: Option<&str>) -> String {
    let url = stored
        .filter(|url| !url.trim().is_empty())
        .or_else(|| build_time.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

fn stored_url(key: &str) -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()??
        .get_item(key)
        .ok()?
}

/// Base URL of the question-answering service
pub fn get_qa_base() -> String {
    resolve_base(stored_url(QA_URL_KEY), option_env!("INSIGHTX_QA_URL"))
}

/// Base URL of the aggregate endpoints
pub fn get_api_base() -> String {
    resolve_base(stored_url(API_URL_KEY), option_env!("INSIGHTX_API_URL"))
}

/// Browser client for both backend roles
#[derive(Debug, Clone)]
pub struct GlooClient {
    qa_base: String,
    api_base: String,
}

impl GlooClient {
    pub fn new(qa_base: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            qa_base: qa_base.into(),
            api_base: api_base.into(),
        }
    }

    /// Client for the endpoints configured in this browser
    pub fn from_storage() -> Self {
        Self::new(get_qa_base(), get_api_base())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = Request::get(&endpoint_url(&self.api_base, path))
            .send()
            .await
            .map_err(network_error)?;

        decode(response).await
    }
}

fn network_error(e: gloo_net::Error) -> ClientError {
    ClientError::Unavailable(e.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let body = response.text().await.map_err(network_error)?;

    if !response.ok() {
        return Err(ClientError::Status {
            status: response.status(),
            message: body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

#[async_trait(?Send)]
impl QaClient for GlooClient {
    async fn ask(&self, request: &AskRequest) -> ClientResult<AskResponse> {
        let response = Request::post(&endpoint_url(&self.qa_base, ASK_PATH))
            .json(request)
            .map_err(|e| ClientError::Request(e.to_string()))?
            .send()
            .await
            .map_err(network_error)?;

        decode(response).await
    }

    async fn clear_session(&self, session_id: &SessionId) -> ClientResult<()> {
        let body = ClearRequest {
            session_id: session_id.clone(),
        };
        let response = Request::post(&endpoint_url(&self.qa_base, CLEAR_PATH))
            .json(&body)
            .map_err(|e| ClientError::Request(e.to_string()))?
            .send()
            .await
            .map_err(network_error)?;

        if response.ok() {
            Ok(())
        } else {
            Err(ClientError::Status {
                status: response.status(),
                message: response.status_text(),
            })
        }
    }
}

#[async_trait(?Send)]
impl DashboardSource for GlooClient {
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
    fn test_stored_override_wins() {
        assert_eq!(
            resolve_base(Some("https://qa.example/".to_string()), Some("http://build:1")),
            "https://qa.example"
        );
    }

    #[test]
    fn test_blank_override_ignored() {
        assert_eq!(
            resolve_base(Some("  ".to_string()), Some("http://build:1")),
            "http://build:1"
        );
    }

    #[test]
    fn test_default_base() {
        assert_eq!(resolve_base(None, None), DEFAULT_BASE_URL);
    }
}
