//! Client configuration with sensible defaults.
//!
//! [`ApiConfig`] controls where the backend lives and how long a single
//! request may take. The defaults match a backend started locally on its
//! reference port.

use crate::error::NetworkError;
use url::Url;

/// Reference backend address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Configuration for an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the backend, without the `/api` prefix.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, the crate name and version are used.
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_seconds: 10,
            user_agent: None,
        }
    }
}

impl ApiConfig {
    /// Creates a config pointing at `base_url` with default timeouts.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` must parse as an absolute `http` or `https` URL
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), NetworkError> {
        self.parsed_base_url()?;
        if self.timeout_seconds == 0 {
            return Err(NetworkError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Parses `base_url`, normalising it to end with a slash so relative
    /// endpoint paths join underneath it instead of replacing its last segment.
    pub(crate) fn parsed_base_url(&self) -> Result<Url, NetworkError> {
        let trimmed = self.base_url.trim();
        if trimmed.is_empty() {
            return Err(NetworkError::Config("base_url must not be empty".into()));
        }
        let with_slash = if trimmed.ends_with('/') {
            trimmed.to_owned()
        } else {
            format!("{trimmed}/")
        };
        let url = Url::parse(&with_slash)
            .map_err(|e| NetworkError::Config(format!("invalid base_url '{trimmed}': {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(NetworkError::Config(format!(
                "base_url scheme must be http or https, got '{other}'"
            ))),
        }
    }
}
