//! Integration tests for the task store over a live HTTP backend.
//!
//! Wires [`TaskStore`] to [`HttpTaskApi`] against the in-memory server and
//! exercises the full client flows: initial load, create-and-append,
//! toggle round trips, flag lifecycles observed through the event channel,
//! and error surfacing when the backend misbehaves or is unreachable.

use std::sync::Arc;
use std::time::Duration;

use taskdeck::api::HttpTaskApi;
use taskdeck::store::{StoreError, StoreEvent, StoreSnapshot, TaskStore};
use taskdeck_server::routes::{ServerState, start_server_with_state};
use tokio::sync::mpsc;

/// Start a fresh server and return a store wired to it.
async fn connected_store() -> (
    TaskStore<HttpTaskApi>,
    mpsc::Receiver<StoreEvent>,
    Arc<ServerState>,
) {
    let state = Arc::new(ServerState::new());
    let (addr, _handle) = start_server_with_state("127.0.0.1:0", Arc::clone(&state))
        .await
        .expect("failed to start test server");
    let api = HttpTaskApi::new(&format!("http://{addr}/api"), Duration::from_secs(2))
        .expect("failed to build client");
    let (store, events) = TaskStore::new(api, 64);
    (store, events, state)
}

/// Drain every pending event, returning the carried snapshots in order.
fn drain_snapshots(events: &mut mpsc::Receiver<StoreEvent>) -> Vec<StoreSnapshot> {
    let mut snapshots = Vec::new();
    while let Ok(StoreEvent::StateChanged(snapshot)) = events.try_recv() {
        snapshots.push(snapshot);
    }
    snapshots
}

#[tokio::test]
async fn initial_fetch_loads_server_tasks() {
    let (mut store, _events, state) = connected_store().await;
    state.tasks.insert("pre-existing").await;

    store.fetch_all().await;

    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].title, "pre-existing");
    assert!(!store.is_loading());
    assert!(store.error().is_none());
}

#[tokio::test]
async fn fetch_emits_loading_cycle() {
    let (mut store, mut events, _state) = connected_store().await;

    store.fetch_all().await;

    let snapshots = drain_snapshots(&mut events);
    assert_eq!(snapshots.len(), 2);
    assert!(snapshots[0].is_loading);
    assert!(!snapshots[1].is_loading);
}

#[tokio::test]
async fn add_appends_server_assigned_task() {
    let (mut store, mut events, _state) = connected_store().await;
    store.fetch_all().await;
    drain_snapshots(&mut events);

    store.add("  Buy stamps  ").await.unwrap();

    assert_eq!(store.tasks().len(), 1);
    let task = &store.tasks()[0];
    assert_eq!(task.title, "Buy stamps"); // trimmed before sending
    assert_eq!(task.id, 1);
    assert!(!task.completed);

    let snapshots = drain_snapshots(&mut events);
    assert_eq!(snapshots.len(), 2);
    assert!(snapshots[0].is_saving);
    assert!(!snapshots[1].is_saving);
}

#[tokio::test]
async fn add_empty_title_never_reaches_server() {
    let (mut store, _events, state) = connected_store().await;

    let err = store.add("   ").await.unwrap_err();
    assert_eq!(err, StoreError::TitleEmpty);
    assert!(store.error().is_some());
    assert!(state.tasks.list().await.is_empty());
}

#[tokio::test]
async fn add_rejected_by_server_reraises_and_keeps_collection() {
    let (mut store, _events, _state) = connected_store().await;
    store.add("keep me").await.unwrap();

    // Longer than the server's title limit, so the create comes back 400.
    let oversized = "x".repeat(300);
    let err = store.add(&oversized).await.unwrap_err();

    assert!(matches!(err, StoreError::Request(_)));
    assert!(store.error().is_some());
    assert!(!store.is_saving());
    assert_eq!(store.tasks().len(), 1);
}

#[tokio::test]
async fn toggle_round_trips_through_server() {
    let (mut store, mut events, state) = connected_store().await;
    store.add("flip me").await.unwrap();
    drain_snapshots(&mut events);
    let id = store.tasks()[0].id;

    store.toggle(id).await;
    assert!(store.tasks()[0].completed);
    assert!(state.tasks.get(id).await.unwrap().completed);

    let snapshots = drain_snapshots(&mut events);
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].updating_id, Some(id));
    assert_eq!(snapshots[1].updating_id, None);

    store.toggle(id).await;
    assert!(!store.tasks()[0].completed);
    assert!(!state.tasks.get(id).await.unwrap().completed);
}

#[tokio::test]
async fn toggle_unknown_id_is_a_complete_noop() {
    let (mut store, mut events, _state) = connected_store().await;
    store.add("only one").await.unwrap();
    drain_snapshots(&mut events);

    store.toggle(999).await;

    assert!(drain_snapshots(&mut events).is_empty());
    assert!(store.error().is_none());
    assert!(store.updating_id().is_none());
}

#[tokio::test]
async fn fetch_failure_keeps_prior_tasks_and_sets_error() {
    let state = Arc::new(ServerState::new());
    state.tasks.insert("survivor").await;
    let (addr, handle) = start_server_with_state("127.0.0.1:0", state)
        .await
        .expect("failed to start test server");
    let api = HttpTaskApi::new(&format!("http://{addr}/api"), Duration::from_millis(500))
        .expect("failed to build client");
    let (mut store, _events) = TaskStore::new(api, 64);

    store.fetch_all().await;
    assert_eq!(store.tasks().len(), 1);

    // Kill the backend, then try again: the stale list must survive.
    handle.abort();
    let _ = handle.await;

    store.fetch_all().await;
    assert!(store.error().is_some());
    assert!(!store.is_loading());
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].title, "survivor");
}

#[tokio::test]
async fn unreachable_backend_surfaces_error_without_stuck_flags() {
    let api = HttpTaskApi::new("http://127.0.0.1:1/api", Duration::from_millis(200))
        .expect("failed to build client");
    let (mut store, _events) = TaskStore::new(api, 64);

    store.add("seed").await.unwrap_err();
    assert!(store.error().is_some());
    assert!(!store.is_saving());

    store.fetch_all().await;
    assert!(store.error().is_some());
    assert!(!store.is_loading());
    assert!(store.tasks().is_empty());
}

#[tokio::test]
async fn next_operation_clears_previous_error() {
    let (mut store, _events, _state) = connected_store().await;

    // Provoke an error, then confirm a successful operation clears it.
    store.add("   ").await.unwrap_err();
    assert!(store.error().is_some());

    store.fetch_all().await;
    assert!(store.error().is_none());
}
