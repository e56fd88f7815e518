//! Single writer for the session state.
//!
//! [`SyncOrchestrator::apply`] is the only function that mutates a
//! [`SyncState`]. It routes each [`Event`] to the component that owns it and
//! returns the [`Effect`]s that component asks for. It performs no I/O; the
//! runtime in [`crate::runtime`] executes effects and feeds results back.
//!
//! The orchestrator also owns session bootstrap. It runs once per session:
//!
//! 1. Fetch the status.
//! 2. With no processed videos, send the intro query.
//! 3. Otherwise fetch the conversation. Adopt its latest assistant message if
//!    one exists, else send the summary query.
//!
//! `initialized` is set however the bootstrap ends, including on failure.

use crate::config::BootstrapConfig;
use crate::conversation;
use crate::event::{ConversationPurpose, Effect, Event, StatusPurpose};
use crate::poller;
use crate::query;
use crate::state::{RecordingPhase, SyncState};
use crate::toggle;
use nexus_api::{ConversationSnapshot, NetworkError, Status};
use tracing::{debug, info, warn};

/// Routes events to components and owns session bootstrap.
#[derive(Debug, Clone, Default)]
pub struct SyncOrchestrator {
    bootstrap: BootstrapConfig,
}

impl SyncOrchestrator {
    pub fn new(bootstrap: BootstrapConfig) -> Self {
        Self { bootstrap }
    }

    /// Apply one event to `state` and return the effects to run.
    pub fn apply(&self, state: &mut SyncState, event: Event) -> Vec<Effect> {
        match event {
            Event::SessionStarted => self.start_session(state),
            Event::PollTick => poller::on_tick(state),
            Event::StatusFetched {
                purpose: StatusPurpose::Poll,
                epoch,
                result,
            } => poller::on_status(state, epoch, result),
            Event::StatusFetched {
                purpose: StatusPurpose::Init,
                result,
                ..
            } => self.on_init_status(state, result),
            Event::ConversationFetched {
                purpose: ConversationPurpose::Init,
                result,
                ..
            } => self.on_init_conversation(state, result),
            Event::ConversationFetched {
                purpose,
                epoch,
                result,
            } => {
                poller::on_conversation(state, purpose, epoch, result);
                Vec::new()
            }
            Event::HotkeyPressed => toggle::on_hotkey(state),
            Event::ToggleCompleted { result } => toggle::on_toggle_result(state, result),
            Event::CooldownElapsed => {
                toggle::on_cooldown_elapsed(state);
                Vec::new()
            }
            Event::QueryRequested { query } => query::begin(state, query),
            Event::QueryCompleted { result } => {
                query::on_result(state, result);
                Vec::new()
            }
        }
    }

    fn start_session(&self, state: &mut SyncState) -> Vec<Effect> {
        if state.initialized || state.init_running {
            debug!("session bootstrap already done or running");
            return Vec::new();
        }
        state.init_running = true;
        vec![Effect::FetchStatus {
            purpose: StatusPurpose::Init,
            epoch: state.epoch,
        }]
    }

    fn on_init_status(
        &self,
        state: &mut SyncState,
        result: nexus_api::Result<Status>,
    ) -> Vec<Effect> {
        let status = match result {
            Ok(status) => status,
            Err(e) => {
                finish_with_error(state, &e);
                return Vec::new();
            }
        };

        // A poll or toggle may already have moved on; only adopt into a quiet state.
        if state.recording == RecordingPhase::Idle && !state.is_toggle_pending() {
            state.status = status;
            if status.is_recording {
                state.recording = RecordingPhase::Recording;
            }
        }

        if status.processed_video_count > 0 {
            return vec![Effect::FetchConversation {
                purpose: ConversationPurpose::Init,
                epoch: state.epoch,
            }];
        }

        info!("no processed videos yet; sending intro query");
        finish(state);
        query::begin(state, self.bootstrap.intro_query.clone())
    }

    fn on_init_conversation(
        &self,
        state: &mut SyncState,
        result: nexus_api::Result<ConversationSnapshot>,
    ) -> Vec<Effect> {
        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(e) => {
                finish_with_error(state, &e);
                return Vec::new();
            }
        };

        let has_answer = conversation::latest_assistant_message(&snapshot).is_some();
        if state.is_processing_video() {
            debug!("bootstrap conversation not adopted while processing");
        } else {
            conversation::adopt(state, snapshot);
        }
        finish(state);

        if has_answer {
            info!("session resumed with existing assistant answer");
            return Vec::new();
        }
        info!("videos exist but no assistant answer; sending summary query");
        query::begin(state, self.bootstrap.summary_query.clone())
    }
}

fn finish(state: &mut SyncState) {
    state.init_running = false;
    state.initialized = true;
}

fn finish_with_error(state: &mut SyncState, err: &NetworkError) {
    warn!(error = %err, "session bootstrap failed");
    state.last_agent_response = format!("Error initializing session: {err}");
    finish(state);
}
