//! Hotkey-driven recording toggle.
//!
//! A key press starts a toggle only when no toggle is pending and no video is
//! being processed. Starting a recording publishes a placeholder before the
//! network call returns. On success the displayed flag is set to the target
//! value optimistically; the next fresh poll confirms or corrects it. Either
//! way the toggle then cools down before accepting another press.

use crate::event::Effect;
use crate::state::{Confirmation, SyncState, TogglePhase};
use nexus_api::ToggleResponse;
use tracing::{debug, info, warn};

/// Shown as soon as a start is requested.
pub const RECORDING_STARTED: &str =
    "Recording started... Stop the recording when you're done and the agent will analyze it.";

/// What the caller should do with the original key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The key is the recording hotkey; suppress its default action.
    Consumed,
    /// Not ours; let the key through.
    Ignored,
}

/// The key that toggles recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey(String);

impl Hotkey {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_owned())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Case-insensitive match against a key name such as `"F9"`.
    pub fn matches(&self, key: &str) -> bool {
        self.0.eq_ignore_ascii_case(key.trim())
    }

    pub fn disposition(&self, key: &str) -> KeyDisposition {
        if self.matches(key) {
            KeyDisposition::Consumed
        } else {
            KeyDisposition::Ignored
        }
    }
}

impl Default for Hotkey {
    fn default() -> Self {
        Self::new("F9")
    }
}

/// Handle one hotkey press.
pub fn on_hotkey(state: &mut SyncState) -> Vec<Effect> {
    if state.is_toggle_pending() {
        debug!(toggle = ?state.toggle, "hotkey ignored: toggle pending");
        return Vec::new();
    }
    if state.is_processing_video() {
        debug!("hotkey ignored: video is being processed");
        return Vec::new();
    }

    let target = !state.status.is_recording;
    state.toggle = TogglePhase::InFlight { target };
    state.advance_epoch();
    if target {
        state.last_agent_response = RECORDING_STARTED.to_owned();
    }
    info!(start = target, "toggling recording");
    vec![Effect::ToggleRecording]
}

/// Apply the result of `toggle_recording` and start the cooldown.
pub fn on_toggle_result(
    state: &mut SyncState,
    result: nexus_api::Result<ToggleResponse>,
) -> Vec<Effect> {
    let TogglePhase::InFlight { target } = state.toggle else {
        warn!(toggle = ?state.toggle, "toggle result arrived with no toggle in flight");
        return Vec::new();
    };
    state.advance_epoch();

    match result {
        Ok(response) => {
            info!(message = %response.message, recording = target, "toggle accepted");
            state.status.is_recording = target;
            state.confirmation = Confirmation::Pending { expected: target };
        }
        Err(e) => {
            warn!(error = %e, "toggle failed; recording state unchanged");
            state.last_agent_response = format!("Error toggling recording: {e}");
        }
    }

    state.toggle = TogglePhase::Cooldown;
    vec![Effect::StartCooldown]
}

/// The cooldown elapsed; accept hotkey presses again.
pub fn on_cooldown_elapsed(state: &mut SyncState) {
    if state.toggle == TogglePhase::Cooldown {
        state.toggle = TogglePhase::Ready;
    }
}
