//! Health endpoint integration tests.

use std::sync::Arc;

use kioskpulse_api::AppState;
use kioskpulse_core::SystemClock;
use kioskpulse_testing::{spawn_server, FailingStore, InMemoryStore};

#[tokio::test]
async fn health_reports_healthy_when_store_is_up() {
    let state = AppState::new(Arc::new(InMemoryStore::new()), Arc::new(SystemClock::new()));
    let addr = spawn_server(state).await;

    let response = reqwest::get(format!("http://{addr}/health"))
        .await
        .expect("Request should complete");

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Response should be valid JSON");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "up");
}

#[tokio::test]
async fn health_reports_unhealthy_when_store_is_down() {
    let state = AppState::new(Arc::new(FailingStore::new()), Arc::new(SystemClock::new()));
    let addr = spawn_server(state).await;

    let response = reqwest::get(format!("http://{addr}/health"))
        .await
        .expect("Request should complete");

    assert_eq!(response.status(), 503);

    let body: serde_json::Value = response.json().await.expect("Response should be valid JSON");
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"]["database"]["status"], "down");
    assert!(body["checks"]["database"]["message"].as_str().is_some());
}

#[tokio::test]
async fn readiness_mirrors_health() {
    let state = AppState::new(Arc::new(InMemoryStore::new()), Arc::new(SystemClock::new()));
    let addr = spawn_server(state).await;

    let response = reqwest::get(format!("http://{addr}/ready"))
        .await
        .expect("Request should complete");

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn liveness_does_not_touch_the_store() {
    // A dead store must not fail the liveness probe.
    let state = AppState::new(Arc::new(FailingStore::new()), Arc::new(SystemClock::new()));
    let addr = spawn_server(state).await;

    let response = reqwest::get(format!("http://{addr}/live"))
        .await
        .expect("Request should complete");

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Response should be valid JSON");
    assert_eq!(body["status"], "alive");
}
