//! Status poller reconciliation.
//!
//! The poller is the only component that learns ground truth from the
//! backend. Every tick fetches [`Status`]; what happens next depends on the
//! confirmed [`RecordingPhase`]:
//!
//! - `Idle` with the displayed flag off: full adopt. Take the new status and
//!   refetch the conversation.
//! - `Idle` with the displayed flag on: a local start is awaiting
//!   confirmation. Partial update; a confirmed start enters `Recording`.
//! - `Recording` and the backend stopped: **stop edge**. Enter `Processing`
//!   with the last trusted video count as baseline and show a placeholder.
//!   The new count is not trusted yet.
//! - `Processing`, not recording, and the count passed the baseline:
//!   **completion edge**. Adopt the status, leave `Processing`, fetch the
//!   conversation once more to pick up the new answer.
//! - Anything else: partial update of `is_recording` alone.

use crate::conversation;
use crate::event::{ConversationPurpose, Effect, StatusPurpose};
use crate::state::{Confirmation, RecordingPhase, SyncState};
use nexus_api::{ConversationSnapshot, Status};
use tracing::{debug, info, warn};

/// Shown between the stop edge and the completion edge.
pub const PROCESSING_PLACEHOLDER: &str = "Recording stopped. Processing your video... \
     The agent will respond once the analysis is complete.";

/// What a freshly polled status means for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    FullAdopt,
    StopEdge,
    CompletionEdge,
    Partial,
}

/// Classify `polled` against the confirmed phase and the displayed flag in `state`.
pub fn classify(state: &SyncState, polled: &Status) -> PollOutcome {
    match state.recording {
        RecordingPhase::Idle if state.status.is_recording => PollOutcome::Partial,
        RecordingPhase::Idle => PollOutcome::FullAdopt,
        RecordingPhase::Recording if !polled.is_recording => PollOutcome::StopEdge,
        RecordingPhase::Recording => PollOutcome::Partial,
        RecordingPhase::Processing { baseline }
            if !polled.is_recording && polled.processed_video_count > baseline =>
        {
            PollOutcome::CompletionEdge
        }
        RecordingPhase::Processing { .. } => PollOutcome::Partial,
    }
}

/// Start a poll: fetch the status tagged with the current epoch.
pub fn on_tick(state: &SyncState) -> Vec<Effect> {
    vec![Effect::FetchStatus {
        purpose: StatusPurpose::Poll,
        epoch: state.epoch,
    }]
}

/// Apply the result of a poll status fetch.
pub fn on_status(
    state: &mut SyncState,
    epoch: u64,
    result: nexus_api::Result<Status>,
) -> Vec<Effect> {
    let polled = match result {
        Ok(status) => status,
        Err(e) => {
            warn!(error = %e, "status poll failed; retrying on next tick");
            return Vec::new();
        }
    };

    if epoch != state.epoch {
        debug!(
            issued = epoch,
            current = state.epoch,
            "discarding status that raced a toggle"
        );
        return Vec::new();
    }

    if let Confirmation::Pending { expected } = state.confirmation {
        if polled.is_recording != expected {
            warn!(
                expected,
                polled = polled.is_recording,
                "backend disagrees with optimistic recording flag"
            );
        }
        state.confirmation = Confirmation::Confirmed;
    }

    match classify(state, &polled) {
        PollOutcome::FullAdopt => {
            state.status = polled;
            if polled.is_recording {
                state.recording = RecordingPhase::Recording;
            }
            vec![Effect::FetchConversation {
                purpose: ConversationPurpose::Adopt,
                epoch: state.epoch,
            }]
        }
        PollOutcome::StopEdge => {
            let baseline = state.trusted_video_count();
            info!(
                baseline,
                polled_count = polled.processed_video_count,
                "stop edge: backend is processing the recording"
            );
            state.recording = RecordingPhase::Processing { baseline };
            state.status.is_recording = false;
            state.last_agent_response = PROCESSING_PLACEHOLDER.to_owned();
            Vec::new()
        }
        PollOutcome::CompletionEdge => {
            info!(
                count = polled.processed_video_count,
                "completion edge: video analysis finished"
            );
            state.status = polled;
            state.recording = RecordingPhase::Idle;
            vec![Effect::FetchConversation {
                purpose: ConversationPurpose::Completion,
                epoch: state.epoch,
            }]
        }
        PollOutcome::Partial => {
            state.status.is_recording = polled.is_recording;
            if polled.is_recording && state.recording == RecordingPhase::Idle {
                debug!("local start confirmed by backend");
                state.recording = RecordingPhase::Recording;
            }
            Vec::new()
        }
    }
}

/// Apply a conversation fetched by a full adopt or a completion edge.
pub fn on_conversation(
    state: &mut SyncState,
    purpose: ConversationPurpose,
    epoch: u64,
    result: nexus_api::Result<ConversationSnapshot>,
) {
    let snapshot = match result {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, ?purpose, "conversation fetch failed");
            return;
        }
    };

    if purpose == ConversationPurpose::Adopt {
        if epoch != state.epoch {
            debug!("discarding conversation that raced a toggle");
            return;
        }
        if state.is_processing_video() {
            debug!("discarding conversation fetched before the stop edge");
            return;
        }
    }

    let published = conversation::adopt(state, snapshot);
    debug!(?purpose, published, "conversation adopted");
}
