//! # nexus-api
//!
//! Typed client for the Agentic Nexus backend: the service that records the
//! screen, analyses each recording and keeps an agent conversation about the
//! results.
//!
//! ## Endpoints
//!
//! | Method | Path                     | Result                      |
//! |--------|--------------------------|-----------------------------|
//! | GET    | `/api/status`            | [`Status`]                  |
//! | GET    | `/api/conversation`      | [`ConversationSnapshot`]    |
//! | POST   | `/api/toggle_recording`  | [`ToggleResponse`]          |
//! | POST   | `/api/agent_query`       | [`QueryResponse`]           |
//! | GET    | `/api/latest_video_info` | [`LatestVideoInfo`]         |
//! | GET    | `/api/memory`            | [`MemorySnapshot`]          |
//!
//! Every call is a single round trip. Transport and decode failures are
//! returned as [`NetworkError`]; the client never retries.
//!
//! ```no_run
//! # async fn example() -> nexus_api::Result<()> {
//! let client = nexus_api::ApiClient::new(&nexus_api::ApiConfig::default())?;
//! let status = client.get_status().await?;
//! println!("recording: {}", status.is_recording);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::ApiClient;
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use error::{NetworkError, Result};
pub use types::{
    ConversationSnapshot, LatestVideoInfo, MemoryContext, MemorySnapshot, Message, QueryResponse,
    Role, Status, ToggleResponse, Video, VideoStatus,
};
