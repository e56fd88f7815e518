//! Wire types for the backend JSON API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Recording flag and processed-video counter reported by `GET /api/status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Whether the backend is currently capturing.
    pub is_recording: bool,
    /// Number of videos the backend has finished analysing (monotonic).
    pub processed_video_count: u64,
}

/// Speaker of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    /// Any role this client does not know about.
    #[serde(other)]
    Other,
}

/// One entry of the server-side message history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(default)]
    pub content: String,
}

impl Message {
    /// Convenience constructor for an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Convenience constructor for a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

/// Processing outcome attached to some video entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    /// The backend declined to analyse the recording. Hidden from display.
    Skipped,
    /// The recording had been analysed earlier but the result was unavailable.
    AlreadyAnalyzed,
    #[serde(other)]
    Other,
}

/// One analysed recording.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// ISO-8601 timestamp of the recording.
    #[serde(default)]
    pub timestamp: String,
    /// Short description produced by the analysis.
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VideoStatus>,
    /// Remaining analysis fields (topics, transcript, ...), kept opaque.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Video {
    /// Returns `true` unless the backend marked this entry as skipped.
    pub fn is_displayable(&self) -> bool {
        self.status != Some(VideoStatus::Skipped)
    }
}

/// Display-only projection of the backend memory subsystem.
///
/// Never interpreted by the synchronization core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_focus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub established_facts: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recent_activities: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferences: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub challenges: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<Value>,
    /// Keys added by newer backends.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full conversation state returned by `GET /api/conversation`.
///
/// Always replaced wholesale on a successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationSnapshot {
    #[serde(default)]
    pub history: Vec<Message>,
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub memory_context: MemoryContext,
}

impl ConversationSnapshot {
    /// Videos to show in a listing; `skipped` entries are filtered out.
    ///
    /// The server-side `processed_video_count` still includes them.
    pub fn displayable_videos(&self) -> impl Iterator<Item = &Video> {
        self.videos.iter().filter(|v| v.is_displayable())
    }
}

/// Body of a successful `POST /api/toggle_recording`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleResponse {
    #[serde(default)]
    pub message: String,
}

/// Raw toggle body; the backend reports some failures as `{"error": ...}`
/// with a success status.
#[derive(Debug, Deserialize)]
pub(crate) struct RawToggleResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /api/agent_query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Answer returned by `POST /api/agent_query`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub response: String,
}

/// Body of `GET /api/latest_video_info`.
///
/// Either `video` + `agent_analysis` are present, or only `message`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatestVideoInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_context: Option<MemoryContext>,
}

/// Body of `GET /api/memory`. The tiers are opaque to this client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    #[serde(default)]
    pub short_term_memory: Value,
    #[serde(default)]
    pub working_memory: Value,
    #[serde(default)]
    pub long_term_memory: Value,
}
