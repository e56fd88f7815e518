//! Error types for the nexus-api crate.
//!
//! Every failure of a backend call surfaces as a [`NetworkError`]. The client
//! performs no recovery of its own; callers decide what the user sees.

/// Errors that can occur while talking to the recording/analysis backend.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The request never produced a response (connect failure, I/O).
    #[error("transport error: {0}")]
    Transport(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The backend answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The backend answered successfully but reported an application error.
    #[error("backend rejected request: {0}")]
    Rejected(String),

    /// Invalid client configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl NetworkError {
    /// Map a [`reqwest::Error`] raised while sending or reading a response.
    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }

    /// Returns `true` when the backend could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }
}

/// Convenience type alias for nexus-api results.
pub type Result<T> = std::result::Result<T, NetworkError>;
