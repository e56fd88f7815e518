//! Backend seam used by the session runtime.

use async_trait::async_trait;
use nexus_api::{ApiClient, ConversationSnapshot, QueryResponse, Status, ToggleResponse};

/// The four backend calls the synchronization engine relies on.
///
/// Implemented by [`ApiClient`]; tests can substitute a scripted backend.
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    async fn get_status(&self) -> nexus_api::Result<Status>;
    async fn get_conversation(&self) -> nexus_api::Result<ConversationSnapshot>;
    async fn toggle_recording(&self) -> nexus_api::Result<ToggleResponse>;
    async fn query_agent(&self, query: &str) -> nexus_api::Result<QueryResponse>;
}

#[async_trait]
impl Backend for ApiClient {
    async fn get_status(&self) -> nexus_api::Result<Status> {
        ApiClient::get_status(self).await
    }

    async fn get_conversation(&self) -> nexus_api::Result<ConversationSnapshot> {
        ApiClient::get_conversation(self).await
    }

    async fn toggle_recording(&self) -> nexus_api::Result<ToggleResponse> {
        ApiClient::toggle_recording(self).await
    }

    async fn query_agent(&self, query: &str) -> nexus_api::Result<QueryResponse> {
        ApiClient::query_agent(self, query).await
    }
}
