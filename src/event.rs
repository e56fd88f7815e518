//! Inputs and outputs of the orchestrator reducer.
//!
//! [`Event`]s are everything that can happen to a session: user input, timer
//! ticks and the results of backend calls. [`Effect`]s are the side effects
//! the reducer asks the runtime to perform; their results come back as events.

use nexus_api::{ConversationSnapshot, QueryResponse, Status, ToggleResponse};

/// Why a status fetch was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPurpose {
    /// Regular poller tick.
    Poll,
    /// Session bootstrap.
    Init,
}

/// Why a conversation fetch was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationPurpose {
    /// Full adopt from a stable poll.
    Adopt,
    /// One-off fetch after the completion edge.
    Completion,
    /// Session bootstrap.
    Init,
}

#[derive(Debug)]
pub enum Event {
    SessionStarted,
    PollTick,
    StatusFetched {
        purpose: StatusPurpose,
        epoch: u64,
        result: nexus_api::Result<Status>,
    },
    ConversationFetched {
        purpose: ConversationPurpose,
        epoch: u64,
        result: nexus_api::Result<ConversationSnapshot>,
    },
    HotkeyPressed,
    ToggleCompleted {
        result: nexus_api::Result<ToggleResponse>,
    },
    CooldownElapsed,
    QueryRequested {
        query: String,
    },
    QueryCompleted {
        result: nexus_api::Result<QueryResponse>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchStatus {
        purpose: StatusPurpose,
        epoch: u64,
    },
    FetchConversation {
        purpose: ConversationPurpose,
        epoch: u64,
    },
    ToggleRecording,
    QueryAgent {
        query: String,
    },
    /// Deliver [`Event::CooldownElapsed`] after the toggle cooldown.
    StartCooldown,
}
