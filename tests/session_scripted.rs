//! Session runtime tests against a scripted in-memory backend.
//!
//! These run on a paused tokio clock so poll intervals and the toggle
//! cooldown elapse instantly and deterministically.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use nexus_api::{ConversationSnapshot, Message, QueryResponse, Status, ToggleResponse};
use nexus_sync::{
    Backend, KeyDisposition, PROCESSING_PLACEHOLDER, RECORDING_STARTED, RecordingPhase,
    SyncConfig, SyncHandle, SyncSession, SyncState, TogglePhase,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Script {
    status: Status,
    conversation: ConversationSnapshot,
    toggles: usize,
    queries: Vec<String>,
}

/// Backend whose answers are set by the test. Toggle calls take a while so
/// repeated key presses land while one is in flight.
#[derive(Clone, Default)]
struct ScriptedBackend(Arc<Mutex<Script>>);

impl ScriptedBackend {
    fn with(status: Status, conversation: ConversationSnapshot) -> Self {
        Self(Arc::new(Mutex::new(Script {
            status,
            conversation,
            ..Default::default()
        })))
    }

    fn edit(&self, f: impl FnOnce(&mut Script)) {
        f(&mut self.0.lock().unwrap());
    }

    fn toggles(&self) -> usize {
        self.0.lock().unwrap().toggles
    }

    fn queries(&self) -> Vec<String> {
        self.0.lock().unwrap().queries.clone()
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn get_status(&self) -> nexus_api::Result<Status> {
        Ok(self.0.lock().unwrap().status)
    }

    async fn get_conversation(&self) -> nexus_api::Result<ConversationSnapshot> {
        Ok(self.0.lock().unwrap().conversation.clone())
    }

    async fn toggle_recording(&self) -> nexus_api::Result<ToggleResponse> {
        tokio::time::sleep(Duration::from_millis(300)).await;
        let mut script = self.0.lock().unwrap();
        script.toggles += 1;
        script.status.is_recording = !script.status.is_recording;
        let message = if script.status.is_recording {
            "Recording started"
        } else {
            "Recording stopped. Processing recordings/session.mp4"
        };
        Ok(ToggleResponse {
            message: message.into(),
        })
    }

    async fn query_agent(&self, query: &str) -> nexus_api::Result<QueryResponse> {
        self.0.lock().unwrap().queries.push(query.to_owned());
        Ok(QueryResponse {
            response: format!("answer to: {query}"),
        })
    }
}

fn status(is_recording: bool, count: u64) -> Status {
    Status {
        is_recording,
        processed_video_count: count,
    }
}

fn answered(content: &str) -> ConversationSnapshot {
    ConversationSnapshot {
        history: vec![
            Message::user("A new video was recorded"),
            Message::assistant(content),
        ],
        ..Default::default()
    }
}

fn start(backend: &ScriptedBackend) -> SyncHandle {
    let (session, handle) = SyncSession::new(Arc::new(backend.clone()), &SyncConfig::default());
    session.run();
    handle
}

async fn wait_until(handle: &SyncHandle, what: impl FnMut(&SyncState) -> bool) -> SyncState {
    let mut rx = handle.subscribe();
    let state = tokio::time::timeout(Duration::from_secs(120), rx.wait_for(what))
        .await
        .expect("condition not reached in time")
        .expect("session stopped")
        .clone();
    state
}

#[tokio::test(start_paused = true)]
async fn repeated_presses_issue_exactly_one_toggle() {
    let backend = ScriptedBackend::with(status(false, 1), answered("Earlier summary"));
    let handle = start(&backend);
    wait_until(&handle, |s| s.initialized).await;

    for _ in 0..5 {
        assert_eq!(handle.key_event("F9").unwrap(), KeyDisposition::Consumed);
    }
    let state = wait_until(&handle, |s| s.toggle == TogglePhase::Cooldown).await;
    assert!(state.status.is_recording);
    assert_eq!(state.last_agent_response, RECORDING_STARTED);

    // Presses during the cooldown are dropped too.
    handle.key_event("F9").unwrap();
    wait_until(&handle, |s| !s.is_toggle_pending()).await;
    assert_eq!(backend.toggles(), 1);

    // After the cooldown a single press toggles again.
    handle.key_event("f9").unwrap();
    wait_until(&handle, |s| s.toggle == TogglePhase::Cooldown).await;
    assert_eq!(backend.toggles(), 2);
    assert!(backend.queries().is_empty());
}

#[tokio::test(start_paused = true)]
async fn started_placeholder_survives_confirming_poll() {
    let backend = ScriptedBackend::with(status(false, 1), answered("Earlier summary"));
    let handle = start(&backend);
    wait_until(&handle, |s| s.initialized).await;

    handle.key_event("F9").unwrap();
    wait_until(&handle, |s| s.toggle == TogglePhase::Cooldown).await;

    // The first poll after the start confirms recording without refetching
    // the conversation.
    let state = wait_until(&handle, |s| s.recording == RecordingPhase::Recording).await;
    assert!(state.status.is_recording);
    assert!(!state.is_awaiting_confirmation());
    assert_eq!(state.last_agent_response, RECORDING_STARTED);

    // Later polls while recording leave the placeholder alone too.
    tokio::time::sleep(Duration::from_secs(12)).await;
    assert_eq!(handle.snapshot().last_agent_response, RECORDING_STARTED);
    assert_eq!(backend.toggles(), 1);
}

#[tokio::test(start_paused = true)]
async fn stop_and_completion_edges_drive_processing() {
    let backend = ScriptedBackend::with(status(true, 1), answered("Earlier summary"));
    let handle = start(&backend);
    let state = wait_until(&handle, |s| s.initialized).await;
    assert!(state.status.is_recording);
    assert_eq!(state.last_agent_response, "Earlier summary");

    // Recording stops on the backend; the count rises before the answer lands.
    backend.edit(|s| s.status = status(false, 2));
    let state = wait_until(&handle, |s| s.is_processing_video()).await;
    assert_eq!(state.last_agent_response, PROCESSING_PLACEHOLDER);
    assert_eq!(state.status.processed_video_count, 1);

    // Hotkey is consumed but does nothing while processing.
    assert_eq!(handle.key_event("F9").unwrap(), KeyDisposition::Consumed);
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(backend.toggles(), 0);
    assert!(handle.snapshot().is_processing_video());

    backend.edit(|s| s.conversation = answered("Your new recording shows a design review."));
    let state = wait_until(&handle, |s| {
        s.last_agent_response == "Your new recording shows a design review."
    })
    .await;
    assert!(!state.is_processing_video());
    assert_eq!(state.status, status(false, 2));
}

#[tokio::test(start_paused = true)]
async fn empty_backend_sends_intro_query_once() {
    let backend = ScriptedBackend::with(status(false, 0), ConversationSnapshot::default());
    let handle = start(&backend);
    let state = wait_until(&handle, |s| s.initialized && !s.loading).await;
    assert_eq!(
        state.last_agent_response,
        "answer to: What can I do with this system?"
    );

    // Several poll periods later the bootstrap has not repeated.
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(backend.queries(), vec!["What can I do with this system?"]);
}

#[tokio::test(start_paused = true)]
async fn other_keys_are_ignored() {
    let backend = ScriptedBackend::with(status(false, 1), answered("Earlier summary"));
    let handle = start(&backend);
    wait_until(&handle, |s| s.initialized).await;

    assert_eq!(handle.key_event("F10").unwrap(), KeyDisposition::Ignored);
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(backend.toggles(), 0);
    assert!(!handle.snapshot().is_toggle_pending());
}
