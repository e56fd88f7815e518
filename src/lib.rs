//! Nexus Sync: client-side state synchronization for the Agentic Nexus
//! recording service.
//!
//! The backend records the user's screen, analyzes finished recordings with
//! an agent, and exposes the results over a small JSON API (see
//! [`nexus_api`]). This crate keeps a local view of that backend consistent
//! while the user toggles recordings with a hotkey and asks the agent
//! questions.
//!
//! # Architecture
//!
//! - **State**: one [`SyncState`] per session, written only by the orchestrator
//! - **Orchestrator**: a pure reducer mapping [`Event`]s to [`Effect`]s
//! - **Components**: status poller, recording toggle, agent queries and
//!   conversation adoption, each a set of functions over the state
//! - **Runtime**: a tokio task that executes effects against a [`Backend`]
//!   and publishes state to [`SyncHandle`] subscribers

pub mod backend;
pub mod config;
pub mod conversation;
pub mod error;
pub mod event;
pub mod orchestrator;
pub mod poller;
pub mod query;
pub mod runtime;
pub mod state;
pub mod toggle;

pub use backend::Backend;
pub use config::SyncConfig;
pub use error::{Result, SyncError};
pub use event::{Effect, Event};
pub use orchestrator::SyncOrchestrator;
pub use poller::PROCESSING_PLACEHOLDER;
pub use runtime::{SyncHandle, SyncSession};
pub use state::{Confirmation, RecordingPhase, SyncState, TogglePhase};
pub use toggle::{Hotkey, KeyDisposition, RECORDING_STARTED};
