//! Backend API contract tests.
//!
//! These tests verify the HTTP shape of every call (method, path, body) and
//! how responses and failures are mapped, against a wiremock server.

use nexus_api::{ApiClient, ApiConfig, NetworkError, Role, VideoStatus};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&ApiConfig::with_base_url(server.uri())).expect("valid test config")
}

// ────────────────────────────────────────────────────────────────────────────
// Happy paths
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_status_decodes_flags() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_recording": true,
            "processed_video_count": 4
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = client_for(&server).get_status().await.unwrap();
    assert!(status.is_recording);
    assert_eq!(status.processed_video_count, 4);
}

#[tokio::test]
async fn get_conversation_decodes_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/conversation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "history": [
                {"role": "user", "content": "A new video was recorded"},
                {"role": "assistant", "content": "You were writing Rust."}
            ],
            "videos": [
                {"status": "skipped"},
                {"timestamp": "2025-03-01 10:00:00", "summary": "Writing Rust", "topics": ["rust"]}
            ],
            "memory_context": {"profile": "Developer", "skills": ["rust"]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = client_for(&server).get_conversation().await.unwrap();
    assert_eq!(snapshot.history.len(), 2);
    assert_eq!(snapshot.history[1].role, Role::Assistant);
    assert_eq!(snapshot.videos[0].status, Some(VideoStatus::Skipped));
    assert_eq!(snapshot.displayable_videos().count(), 1);
    assert_eq!(snapshot.memory_context.profile.as_deref(), Some("Developer"));
}

#[tokio::test]
async fn toggle_recording_posts_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/toggle_recording"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Recording started"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).toggle_recording().await.unwrap();
    assert_eq!(response.message, "Recording started");
}

#[tokio::test]
async fn query_agent_sends_query_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/agent_query"))
        .and(body_json(json!({"query": "What can I do with this system?"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"response": "Press F9 to record."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .query_agent("What can I do with this system?")
        .await
        .unwrap();
    assert_eq!(response.response, "Press F9 to record.");
}

#[tokio::test]
async fn latest_video_info_without_videos() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/latest_video_info"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "No videos available yet"})),
        )
        .mount(&server)
        .await;

    let info = client_for(&server).latest_video_info().await.unwrap();
    assert!(info.video.is_none());
    assert_eq!(info.message.as_deref(), Some("No videos available yet"));
}

#[tokio::test]
async fn memory_tiers_stay_opaque() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/memory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "short_term_memory": [{"type": "video_analysis"}],
            "working_memory": {"established_facts": []},
            "long_term_memory": {"profile_summary": "Developer"}
        })))
        .mount(&server)
        .await;

    let memory = client_for(&server).memory().await.unwrap();
    assert_eq!(memory.short_term_memory[0]["type"], "video_analysis");
    assert_eq!(memory.long_term_memory["profile_summary"], "Developer");
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nexus/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_recording": false,
            "processed_video_count": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&ApiConfig::with_base_url(format!("{}/nexus", server.uri())))
        .expect("valid test config");
    assert!(client.get_status().await.is_ok());
}

// ────────────────────────────────────────────────────────────────────────────
// Error mapping
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn toggle_error_field_maps_to_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/toggle_recording"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"error": "No recording found to process"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).toggle_recording().await.unwrap_err();
    match err {
        NetworkError::Rejected(msg) => assert_eq!(msg, "No recording found to process"),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_maps_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_status().await.unwrap_err();
    match err {
        NetworkError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_json_maps_to_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/conversation"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_conversation().await.unwrap_err();
    assert!(matches!(err, NetworkError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn missing_status_field_maps_to_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"is_recording": false})))
        .mount(&server)
        .await;

    let err = client_for(&server).get_status().await.unwrap_err();
    assert!(matches!(err, NetworkError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_backend_maps_to_transport() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = ApiClient::new(&ApiConfig::with_base_url(uri)).expect("valid test config");
    let err = client.get_status().await.unwrap_err();
    assert!(err.is_transport(), "got {err:?}");
}
