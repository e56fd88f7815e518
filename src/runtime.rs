//! Session actor loop.
//!
//! A [`SyncSession`] owns the [`SyncState`] and runs the orchestrator on a
//! single tokio task. Backend calls run as detached tasks and report back on
//! an internal channel, so a slow request never blocks the loop. State is
//! published through a `watch` channel after every event that changed it.
//!
//! ```rust,ignore
//! let (session, handle) = SyncSession::connect(&config)?;
//! let task = session.run();
//! handle.key_event("F9")?;
//! ```

use crate::backend::Backend;
use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::event::{Effect, Event};
use crate::orchestrator::SyncOrchestrator;
use crate::state::SyncState;
use crate::toggle::{Hotkey, KeyDisposition};
use nexus_api::ApiClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// `tokio::time::interval` rejects a zero period.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Client-side handle to a running session.
///
/// Cheap to clone. Dropping every handle shuts the session down.
#[derive(Debug, Clone)]
pub struct SyncHandle {
    hotkey: Hotkey,
    input_tx: mpsc::UnboundedSender<Event>,
    state_rx: watch::Receiver<SyncState>,
    cancel: CancellationToken,
}

impl SyncHandle {
    /// Offer a key press to the session.
    ///
    /// Returns [`KeyDisposition::Consumed`] when `key` is the recording
    /// hotkey, whether or not the press actually starts a toggle.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Channel`] if the session has stopped.
    pub fn key_event(&self, key: &str) -> Result<KeyDisposition> {
        let disposition = self.hotkey.disposition(key);
        if disposition == KeyDisposition::Consumed {
            self.send(Event::HotkeyPressed)?;
        }
        Ok(disposition)
    }

    /// Send a free-form query to the agent.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Channel`] if the session has stopped.
    pub fn query(&self, query: impl Into<String>) -> Result<()> {
        self.send(Event::QueryRequested {
            query: query.into(),
        })
    }

    /// Receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.state_rx.clone()
    }

    /// Clone of the most recently published state.
    pub fn snapshot(&self) -> SyncState {
        self.state_rx.borrow().clone()
    }

    pub fn hotkey(&self) -> &Hotkey {
        &self.hotkey
    }

    /// Stop the session loop. In-flight requests finish but their results
    /// are dropped.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled() && !self.input_tx.is_closed()
    }

    fn send(&self, event: Event) -> Result<()> {
        self.input_tx
            .send(event)
            .map_err(|_| SyncError::Channel("sync session has stopped".into()))
    }
}

/// The session actor. Create with [`SyncSession::new`], then [`run`](Self::run).
pub struct SyncSession {
    orchestrator: SyncOrchestrator,
    backend: Arc<dyn Backend>,
    state: SyncState,
    state_tx: watch::Sender<SyncState>,
    input_rx: mpsc::UnboundedReceiver<Event>,
    result_tx: mpsc::UnboundedSender<Event>,
    result_rx: mpsc::UnboundedReceiver<Event>,
    poll_interval: Duration,
    cooldown: Duration,
    cancel: CancellationToken,
}

impl SyncSession {
    /// Build a session over `backend` and the handle that drives it.
    pub fn new(backend: Arc<dyn Backend>, config: &SyncConfig) -> (Self, SyncHandle) {
        let state = SyncState::default();
        let (state_tx, state_rx) = watch::channel(state.clone());
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let handle = SyncHandle {
            hotkey: Hotkey::new(&config.toggle.hotkey),
            input_tx,
            state_rx,
            cancel: cancel.clone(),
        };
        let session = Self {
            orchestrator: SyncOrchestrator::new(config.bootstrap.clone()),
            backend,
            state,
            state_tx,
            input_rx,
            result_tx,
            result_rx,
            poll_interval: config.poll.interval().max(MIN_POLL_INTERVAL),
            cooldown: config.toggle.cooldown(),
            cancel,
        };
        (session, handle)
    }

    /// Build a session that talks HTTP to the backend named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn connect(config: &SyncConfig) -> Result<(Self, SyncHandle)> {
        config.validate()?;
        let client = ApiClient::new(&config.api_config())?;
        info!(base_url = %client.base_url(), "connecting to backend");
        Ok(Self::new(Arc::new(client), config))
    }

    /// Spawn the session loop. Must be called from within a tokio runtime.
    pub fn run(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run_loop())
    }

    async fn run_loop(mut self) {
        info!(poll_interval = ?self.poll_interval, "sync session started");
        self.dispatch(Event::SessionStarted);

        // Bootstrap performs the first fetch; polling starts one period later.
        let mut poll =
            tokio::time::interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let cancel = self.cancel.clone();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("sync session cancelled");
                    break;
                }
                _ = poll.tick() => self.dispatch(Event::PollTick),
                input = self.input_rx.recv() => match input {
                    Some(event) => self.dispatch(event),
                    None => {
                        info!("all session handles dropped; stopping");
                        break;
                    }
                },
                Some(event) = self.result_rx.recv() => self.dispatch(event),
            }
        }
    }

    fn dispatch(&mut self, event: Event) {
        let effects = self.orchestrator.apply(&mut self.state, event);
        self.publish();
        for effect in effects {
            self.execute(effect);
        }
    }

    fn publish(&self) {
        let state = &self.state;
        self.state_tx.send_if_modified(|current| {
            if current == state {
                false
            } else {
                *current = state.clone();
                true
            }
        });
    }

    fn execute(&self, effect: Effect) {
        let backend = Arc::clone(&self.backend);
        let tx = self.result_tx.clone();
        debug!(?effect, "executing effect");

        match effect {
            Effect::FetchStatus { purpose, epoch } => {
                tokio::spawn(async move {
                    let result = backend.get_status().await;
                    deliver(&tx, Event::StatusFetched {
                        purpose,
                        epoch,
                        result,
                    });
                });
            }
            Effect::FetchConversation { purpose, epoch } => {
                tokio::spawn(async move {
                    let result = backend.get_conversation().await;
                    deliver(&tx, Event::ConversationFetched {
                        purpose,
                        epoch,
                        result,
                    });
                });
            }
            Effect::ToggleRecording => {
                tokio::spawn(async move {
                    let result = backend.toggle_recording().await;
                    deliver(&tx, Event::ToggleCompleted { result });
                });
            }
            Effect::QueryAgent { query } => {
                tokio::spawn(async move {
                    let result = backend.query_agent(&query).await;
                    deliver(&tx, Event::QueryCompleted { result });
                });
            }
            Effect::StartCooldown => {
                let cooldown = self.cooldown;
                tokio::spawn(async move {
                    tokio::time::sleep(cooldown).await;
                    deliver(&tx, Event::CooldownElapsed);
                });
            }
        }
    }
}

fn deliver(tx: &mpsc::UnboundedSender<Event>, event: Event) {
    if tx.send(event).is_err() {
        debug!("session stopped; dropping late result");
    }
}
