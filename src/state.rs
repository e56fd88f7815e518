//! Session state owned by the orchestrator.
//!
//! A single [`SyncState`] record exists per session. It is only ever mutated
//! by [`SyncOrchestrator::apply`](crate::orchestrator::SyncOrchestrator::apply);
//! everyone else sees clones published through a watch channel.

use nexus_api::{ConversationSnapshot, Status};
use serde::Serialize;

/// Last server-confirmed recording state.
///
/// `status.is_recording` is what the UI shows and may be an optimistic
/// value; this phase is what the poller reconciles against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum RecordingPhase {
    /// Not recording and nothing being processed.
    #[default]
    Idle,
    /// The last trusted poll reported an active recording.
    Recording,
    /// Stop edge seen; waiting for the video counter to exceed `baseline`.
    Processing { baseline: u64 },
}

/// Whether the displayed recording flag has been confirmed by a poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Confirmation {
    #[default]
    Confirmed,
    /// A toggle flipped the flag locally; the next fresh poll settles it.
    Pending { expected: bool },
}

/// Progress of the hotkey-driven toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TogglePhase {
    #[default]
    Ready,
    /// `toggle_recording` has been sent; `target` is the flag value it requests.
    InFlight { target: bool },
    /// The call finished; key presses are dropped until the cooldown elapses.
    Cooldown,
}

/// UI synchronization state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncState {
    /// Last adopted conversation snapshot, replaced wholesale.
    pub conversation: ConversationSnapshot,
    /// Recording flag (possibly optimistic) and last trusted video count.
    pub status: Status,
    /// Text shown as the agent's current answer or a placeholder.
    pub last_agent_response: String,
    /// An agent query is outstanding.
    pub loading: bool,
    /// Session bootstrap has finished (successfully or not).
    pub initialized: bool,
    /// Last recording phase confirmed by a poll.
    pub recording: RecordingPhase,
    /// Whether `status.is_recording` still awaits poll confirmation.
    pub confirmation: Confirmation,
    /// Hotkey toggle progress; anything but `Ready` blocks new toggles.
    pub toggle: TogglePhase,
    /// Advanced whenever a toggle starts or finishes. Fetch results tagged
    /// with an older epoch raced a toggle and are discarded.
    pub epoch: u64,
    #[serde(skip)]
    pub(crate) init_running: bool,
}

impl SyncState {
    /// Post-recording analysis is in progress on the backend.
    pub fn is_processing_video(&self) -> bool {
        matches!(self.recording, RecordingPhase::Processing { .. })
    }

    /// A toggle is in flight or cooling down.
    pub fn is_toggle_pending(&self) -> bool {
        self.toggle != TogglePhase::Ready
    }

    /// The displayed recording flag is an unconfirmed optimistic value.
    pub fn is_awaiting_confirmation(&self) -> bool {
        matches!(self.confirmation, Confirmation::Pending { .. })
    }

    /// Number of processed videos the client currently trusts.
    pub fn trusted_video_count(&self) -> u64 {
        self.status.processed_video_count
    }

    /// Number of videos to list, excluding `skipped` entries.
    pub fn displayable_video_count(&self) -> usize {
        self.conversation.displayable_videos().count()
    }

    pub(crate) fn advance_epoch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }
}
