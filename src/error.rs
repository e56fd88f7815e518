//! Error types for the synchronization engine.

use nexus_api::NetworkError;

/// Top-level error type for nexus-sync.
///
/// Backend failures inside a running session never surface here; they are
/// turned into user-visible text by the component that made the call.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Backend API error outside a running session (e.g. client construction).
    #[error("API error: {0}")]
    Api(#[from] NetworkError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The session task has stopped and no longer accepts input.
    #[error("channel error: {0}")]
    Channel(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, SyncError>;
