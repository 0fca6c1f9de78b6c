//! Integration tests for the HTTP task client against a live server.
//!
//! Starts the in-memory task API server on an OS-assigned port and drives
//! it through [`HttpTaskApi`], verifying the REST contract end to end:
//! list order, id assignment, completion updates, and error message
//! extraction from failure bodies.

use std::sync::Arc;
use std::time::Duration;

use taskdeck::api::{HttpTaskApi, TaskApi};
use taskdeck_server::routes::{ServerState, start_server_with_state};

/// Start a fresh server and return a client pointed at its `/api` root.
async fn start_backend() -> HttpTaskApi {
    let (addr, _handle) = start_server_with_state("127.0.0.1:0", Arc::new(ServerState::new()))
        .await
        .expect("failed to start test server");
    HttpTaskApi::new(&format!("http://{addr}/api"), Duration::from_secs(2))
        .expect("failed to build client")
}

#[tokio::test]
async fn list_on_fresh_server_is_empty() {
    let api = start_backend().await;
    let tasks = api.list_tasks().await.unwrap();
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn create_assigns_ids_and_list_preserves_order() {
    let api = start_backend().await;

    let first = api.create_task("Water the plants").await.unwrap();
    let second = api.create_task("Fix the gate latch").await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert!(!first.completed);

    let tasks = api.list_tasks().await.unwrap();
    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Water the plants", "Fix the gate latch"]);
}

#[tokio::test]
async fn get_returns_created_task() {
    let api = start_backend().await;
    let created = api.create_task("Read the mail").await.unwrap();

    let fetched = api.get_task(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn set_completed_round_trips_both_ways() {
    let api = start_backend().await;
    let task = api.create_task("Flip me").await.unwrap();

    let done = api.set_completed(task.id, true).await.unwrap();
    assert!(done.completed);
    assert_eq!(done.title, "Flip me");

    let undone = api.set_completed(task.id, false).await.unwrap();
    assert!(!undone.completed);
}

#[tokio::test]
async fn unknown_id_surfaces_server_message() {
    let api = start_backend().await;

    let err = api.get_task(99).await.unwrap_err();
    assert_eq!(err.message(), "task 99 not found");

    let err = api.set_completed(99, true).await.unwrap_err();
    assert_eq!(err.message(), "task 99 not found");
}

#[tokio::test]
async fn blank_title_rejected_with_message() {
    let api = start_backend().await;
    let err = api.create_task("   ").await.unwrap_err();
    assert!(!err.message().is_empty());
    assert!(!err.message().starts_with("HTTP"), "got: {}", err.message());
}

#[tokio::test]
async fn missing_route_falls_back_to_status_message() {
    // Point the client at a path the server never mounted; the router's
    // bare 404 has no JSON body, so the status-only fallback applies.
    let (addr, _handle) = start_server_with_state("127.0.0.1:0", Arc::new(ServerState::new()))
        .await
        .expect("failed to start test server");
    let api = HttpTaskApi::new(&format!("http://{addr}/nope"), Duration::from_secs(2))
        .expect("failed to build client");

    let err = api.list_tasks().await.unwrap_err();
    assert_eq!(err.message(), "HTTP 404");
}
