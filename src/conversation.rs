//! Conversation snapshot projection.
//!
//! The poller, the session bootstrap and the completion fetch all decide
//! "what is the agent's latest answer" through [`latest_assistant_message`].

use crate::state::SyncState;
use nexus_api::{ConversationSnapshot, Message};

/// Returns the last message written by the assistant, if any.
pub fn latest_assistant_message(snapshot: &ConversationSnapshot) -> Option<&Message> {
    snapshot.history.iter().rev().find(|m| m.is_assistant())
}

/// Replace the conversation in `state` and publish its latest assistant
/// message. Returns `true` when a message was published.
///
/// When the snapshot holds no assistant message the previous
/// `last_agent_response` is left untouched.
pub fn adopt(state: &mut SyncState, snapshot: ConversationSnapshot) -> bool {
    let latest = latest_assistant_message(&snapshot).map(|m| m.content.clone());
    state.conversation = snapshot;
    match latest {
        Some(content) => {
            state.last_agent_response = content;
            true
        }
        None => false,
    }
}
