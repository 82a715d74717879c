//! HTTP client for the analytics backend's chat endpoint.
//!
//! Wraps the single `POST /api/chat` contract using [`reqwest`]. The
//! [`ChatBackend`] trait is the seam the dispatch layer talks through, so
//! tests can substitute in-memory fakes for the network.

use serde::{Deserialize, Serialize};

use crate::models::SummaryRecord;
use crate::session::FilterState;

/// `search_type` value for the filter-search flow.
pub const SEARCH_TYPE_SUMMARIES: &str = "summaries";

/// Request body for `POST /api/chat`. Built per dispatch from a by-value
/// filter snapshot and not retained after the call settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub query: String,
    pub camera_id: Option<u32>,
    pub start_time: String,
    pub end_time: String,
    /// Present (as `"summaries"`) only for the filter-search flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_type: Option<String>,
}

impl ChatRequest {
    /// Chat-flow request: free-text question plus the current filters.
    pub fn chat(utterance: &str, filters: &FilterState) -> Self {
        Self {
            query: utterance.to_string(),
            camera_id: filters.camera_id,
            start_time: filters.start_time.clone(),
            end_time: filters.end_time.clone(),
            search_type: None,
        }
    }

    /// Filter-search request: empty query, `search_type="summaries"`.
    pub fn search(filters: &FilterState) -> Self {
        Self {
            query: String::new(),
            camera_id: filters.camera_id,
            start_time: filters.start_time.clone(),
            end_time: filters.end_time.clone(),
            search_type: Some(SEARCH_TYPE_SUMMARIES.to_string()),
        }
    }
}

/// Response body from `POST /api/chat`. The backend sends more fields than
/// these; everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    /// Matching summaries; absent is treated as empty.
    #[serde(default)]
    pub ollama_summaries: Option<Vec<SummaryRecord>>,
    /// Application-level failure, possibly alongside HTTP 200.
    #[serde(default)]
    pub error: Option<String>,
}

/// Errors from the chat API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend returned a non-2xx status with an unusable body.
    #[error("backend returned {status}: {body}")]
    Status {
        status: u16,
        body: String,
    },
}

/// Transport seam for the dispatch layer.
pub trait ChatBackend {
    fn send(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<ChatResponse, ApiError>> + Send;
}

/// Live HTTP backend for one analytics server.
#[derive(Debug, Clone)]
pub struct ChatApi {
    client: reqwest::Client,
    base_url: String,
}

impl ChatApi {
    /// Create a client for the server at `base_url` (e.g. `http://host:8080`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ChatBackend for ChatApi {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        tracing::debug!(
            query = %request.query,
            camera_id = ?request.camera_id,
            search_type = ?request.search_type,
            "sending chat request",
        );

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        // The backend reports application errors as JSON with a 5xx status;
        // surface those as a ChatResponse rather than a transport failure.
        if let Ok(parsed) = serde_json::from_str::<ChatResponse>(&body)
            && parsed.error.is_some()
        {
            return Ok(parsed);
        }

        Err(ApiError::Status { status: status.as_u16(), body })
    }
}
