//! Backend Ports
//!
//! The question-answering and dashboard endpoints as traits, so the core
//! never depends on a particular HTTP stack. Futures are not required to be
//! `Send`: browser fetches are single-threaded.

pub mod dto;
#[cfg(feature = "native")]
mod http;

pub use dto::{
    AskRequest, AskResponse, CategoryCounts, ClearRequest, FailureBreakdown, HealthResponse,
    HourlyRate, Summary, Trends,
};
#[cfg(feature = "native")]
pub use http::{HttpClient, HttpClientConfig};

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::session::SessionId;

/// Path of the question endpoint
pub const ASK_PATH: &str = "/api/ask";
/// Path of the server-side session reset
pub const CLEAR_PATH: &str = "/api/clear";
/// Path of the summary aggregate
pub const SUMMARY_PATH: &str = "/api/summary";
/// Path of the failure breakdown
pub const FAILURES_PATH: &str = "/api/data/failures";
/// Path of the hourly trend series
pub const TRENDS_PATH: &str = "/api/data/trends";

/// Default base URL for both endpoints
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Join a base URL and an absolute path, tolerating a trailing slash
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Question-answering endpoint
#[async_trait(?Send)]
pub trait QaClient {
    /// Ask one question within a session
    async fn ask(&self, request: &AskRequest) -> ClientResult<AskResponse>;

    /// Drop the server-side conversation memory for a session
    async fn clear_session(&self, session_id: &SessionId) -> ClientResult<()>;
}

/// Read-only aggregate endpoints
#[async_trait(?Send)]
pub trait DashboardSource {
    async fn summary(&self) -> ClientResult<Summary>;

    async fn failures(&self) -> ClientResult<FailureBreakdown>;

    async fn trends(&self) -> ClientResult<Trends>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            endpoint_url("http://localhost:8000", ASK_PATH),
            "http://localhost:8000/api/ask"
        );
        assert_eq!(
            endpoint_url("https://example.test/", TRENDS_PATH),
            "https://example.test/api/data/trends"
        );
    }
}
