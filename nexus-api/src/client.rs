//! Typed wrapper around the backend endpoints.
//!
//! Each method is exactly one HTTP round trip. There is no retry, no caching
//! and no state beyond the connection pool held by [`reqwest::Client`].

use crate::config::ApiConfig;
use crate::error::{NetworkError, Result};
use crate::http::build_client;
use crate::types::{
    ConversationSnapshot, LatestVideoInfo, MemorySnapshot, QueryRequest, QueryResponse,
    RawToggleResponse, Status, ToggleResponse,
};
use serde::de::DeserializeOwned;
use url::Url;

pub const STATUS_PATH: &str = "api/status";
pub const CONVERSATION_PATH: &str = "api/conversation";
pub const TOGGLE_RECORDING_PATH: &str = "api/toggle_recording";
pub const AGENT_QUERY_PATH: &str = "api/agent_query";
pub const LATEST_VIDEO_INFO_PATH: &str = "api/latest_video_info";
pub const MEMORY_PATH: &str = "api/memory";

/// Client for the recording/analysis backend.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    client: reqwest::Client,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl ApiClient {
    /// Create a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Config`] if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;
        let client = build_client(config)?;
        Ok(Self { base_url, client })
    }

    /// The normalised base URL (always ends with `/`).
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// `GET /api/status`.
    pub async fn get_status(&self) -> Result<Status> {
        self.get_json(STATUS_PATH).await
    }

    /// `GET /api/conversation`.
    pub async fn get_conversation(&self) -> Result<ConversationSnapshot> {
        self.get_json(CONVERSATION_PATH).await
    }

    /// `POST /api/toggle_recording`.
    ///
    /// # Errors
    ///
    /// Besides transport and decode failures, returns
    /// [`NetworkError::Rejected`] when the backend answers with an `error`
    /// field instead of a `message`.
    pub async fn toggle_recording(&self) -> Result<ToggleResponse> {
        let url = self.endpoint(TOGGLE_RECORDING_PATH)?;
        tracing::trace!(%url, "POST");
        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| NetworkError::from_reqwest(&e))?;
        let raw: RawToggleResponse = decode(response).await?;
        match (raw.error, raw.message) {
            (Some(error), _) => Err(NetworkError::Rejected(error)),
            (None, message) => Ok(ToggleResponse {
                message: message.unwrap_or_default(),
            }),
        }
    }

    /// `POST /api/agent_query` with `{ "query": ... }`.
    pub async fn query_agent(&self, query: &str) -> Result<QueryResponse> {
        let url = self.endpoint(AGENT_QUERY_PATH)?;
        tracing::trace!(%url, "POST");
        let body = QueryRequest {
            query: query.to_owned(),
        };
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NetworkError::from_reqwest(&e))?;
        decode(response).await
    }

    /// `GET /api/latest_video_info`.
    ///
    /// Note that the backend runs an agent query to build this answer.
    pub async fn latest_video_info(&self) -> Result<LatestVideoInfo> {
        self.get_json(LATEST_VIDEO_INFO_PATH).await
    }

    /// `GET /api/memory`.
    pub async fn memory(&self) -> Result<MemorySnapshot> {
        self.get_json(MEMORY_PATH).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::trace!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| NetworkError::from_reqwest(&e))?;
        decode(response).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| NetworkError::Config(format!("cannot build URL for {path}: {e}")))
    }
}

/// Check the status code, then decode the body as JSON.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(NetworkError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|e| NetworkError::from_reqwest(&e))?;
    serde_json::from_slice(&bytes).map_err(|e| NetworkError::Decode(e.to_string()))
}
