//! Shared HTTP client construction.

use crate::config::ApiConfig;
use crate::error::NetworkError;
use std::time::Duration;

/// User-Agent sent when the config does not override it.
pub const DEFAULT_USER_AGENT: &str = concat!("nexus-api/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] configured for the backend API.
///
/// The client has the timeout from config and a fixed User-Agent. No retry
/// middleware or caching is installed; every call is one round trip.
///
/// # Errors
///
/// Returns [`NetworkError::Config`] if the client cannot be constructed.
pub fn build_client(config: &ApiConfig) -> Result<reqwest::Client, NetworkError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .build()
        .map_err(|e| NetworkError::Config(format!("failed to build HTTP client: {e}")))
}
