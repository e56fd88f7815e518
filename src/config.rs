//! Configuration types for the synchronization engine.

use crate::error::{Result, SyncError};
use nexus_api::ApiConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Backend connection settings.
    pub api: ApiSection,
    /// Status poller settings.
    pub poll: PollConfig,
    /// Recording hotkey settings.
    pub toggle: ToggleConfig,
    /// Queries issued automatically on first session load.
    pub bootstrap: BootstrapConfig,
}

/// Backend connection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// Base URL of the backend.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Custom User-Agent (None = crate default).
    pub user_agent: Option<String>,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: nexus_api::DEFAULT_BASE_URL.to_owned(),
            timeout_secs: 10,
            user_agent: None,
        }
    }
}

/// Status poller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Period between status polls in milliseconds.
    pub interval_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval_ms: 5_000 }
    }
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Recording toggle configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleConfig {
    /// Key name that toggles recording (compared case-insensitively).
    pub hotkey: String,
    /// Time after a toggle completes during which further hotkey presses are
    /// dropped. Absorbs key-repeat from the input device.
    pub cooldown_ms: u64,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            hotkey: "F9".to_owned(),
            cooldown_ms: 1_000,
        }
    }
}

impl ToggleConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

/// Bootstrap queries sent when a session starts without an assistant answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Sent when videos exist but no assistant message has been produced yet.
    pub summary_query: String,
    /// Sent when the backend has no processed videos at all.
    pub intro_query: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            summary_query: "What videos do I have available? Provide a brief summary of each."
                .to_owned(),
            intro_query: "What can I do with this system?".to_owned(),
        }
    }
}

impl SyncConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SyncError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SyncError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/nexus-sync/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("nexus-sync").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("nexus-sync")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/nexus-sync-config/config.toml")
        }
    }

    /// Project the `[api]` section into a client configuration.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api.base_url.clone(),
            timeout_seconds: self.api.timeout_secs,
            user_agent: self.api.user_agent.clone(),
        }
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.api_config()
            .validate()
            .map_err(|e| SyncError::Config(format!("[api] {e}")))?;
        if self.poll.interval_ms == 0 {
            return Err(SyncError::Config(
                "poll.interval_ms must be greater than 0".into(),
            ));
        }
        if self.toggle.hotkey.trim().is_empty() {
            return Err(SyncError::Config("toggle.hotkey must not be empty".into()));
        }
        if self.bootstrap.summary_query.trim().is_empty()
            || self.bootstrap.intro_query.trim().is_empty()
        {
            return Err(SyncError::Config(
                "bootstrap queries must not be empty".into(),
            ));
        }
        Ok(())
    }
}
