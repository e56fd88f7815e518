//! Agent query request/response cycle.
//!
//! Queries are not deduplicated here; callers avoid double-firing.

use crate::event::Effect;
use crate::state::SyncState;
use nexus_api::QueryResponse;
use tracing::{debug, warn};

/// Mark the session as loading and issue the query.
pub fn begin(state: &mut SyncState, query: String) -> Vec<Effect> {
    debug!(len = query.len(), "agent query issued");
    state.loading = true;
    vec![Effect::QueryAgent { query }]
}

/// Publish the answer (or the failure) and clear `loading` in every case.
pub fn on_result(state: &mut SyncState, result: nexus_api::Result<QueryResponse>) {
    match result {
        Ok(answer) => state.last_agent_response = answer.response,
        Err(e) => {
            warn!(error = %e, "agent query failed");
            state.last_agent_response =
                format!("Error: could not get a response from the agent ({e})");
        }
    }
    state.loading = false;
}
