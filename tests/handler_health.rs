mod common;

use axum_test::TestServer;
use linkvault::infrastructure::persistence::InMemoryUserRepository;
use std::sync::Arc;

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = common::test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["services"]["mongoDB"], "connected");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let server = common::test_server();

    let json = server.get("/health").await.json::<serde_json::Value>();

    let timestamp = json["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert!(timestamp.ends_with('Z'));
    assert!(json["services"].get("mongoDB").is_some());
}

#[tokio::test]
async fn test_health_degrades_when_storage_is_down() {
    let state = common::state_with(
        Arc::new(common::UnreachableLinkRepository),
        Arc::new(InMemoryUserRepository::new()),
    );
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["services"]["mongoDB"], "disconnected");
}
