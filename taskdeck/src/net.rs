//! Wiring between the TUI event loop and the async task store.
//!
//! The store lives in a background tokio task; the TUI main loop sends
//! [`StoreCommand`]s and drains [`UiEvent`]s on each tick.
//!
//! # Architecture
//!
//! ```text
//! TUI (main thread)  ←── UiEvent ────  store worker (tokio task)
//!                     ─── StoreCommand →
//! ```
//!
//! The worker owns the [`TaskStore`], processes intents sequentially, and
//! issues the initial full fetch as soon as it starts. Store state changes
//! are forwarded to the TUI as [`UiEvent::State`] snapshots.

use tokio::sync::mpsc;

use taskdeck_proto::task::TaskId;

use crate::api::{HttpTaskApi, RequestError};
use crate::config::ClientConfig;
use crate::store::{StoreError, StoreEvent, StoreSnapshot, TaskStore};

/// User intents sent from the TUI main loop to the store worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    /// Re-fetch the full task collection (also the retry affordance).
    FetchAll,
    /// Create a task with the given title.
    Add {
        /// Title as typed by the user (trimming happens in the store).
        title: String,
    },
    /// Toggle the completion state of a task.
    Toggle {
        /// Id of the task to toggle.
        id: TaskId,
    },
    /// Gracefully shut down the worker.
    Shutdown,
}

/// Events sent from the store worker to the TUI main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The store's state changed; carries the full new snapshot.
    State(StoreSnapshot),
    /// An `Add` intent failed; the app should restore the user's input.
    AddRejected {
        /// The title that was submitted.
        title: String,
    },
}

/// Spawns the store worker and returns channel handles for the TUI.
///
/// Creates the HTTP client from the resolved configuration, builds a
/// [`TaskStore`] around it, and spawns two background tasks: one forwarding
/// store state changes as [`UiEvent`]s, one processing [`StoreCommand`]s.
/// The worker issues an initial `FetchAll` before handling any command.
///
/// # Errors
///
/// Returns [`RequestError`] if the API base URL is invalid or the HTTP
/// client cannot be constructed.
pub fn spawn_store(
    config: &ClientConfig,
) -> Result<(mpsc::Sender<StoreCommand>, mpsc::Receiver<UiEvent>), RequestError> {
    let api = HttpTaskApi::new(&config.api_url, config.connect_timeout)?;
    let (store, store_rx) = TaskStore::new(api, config.event_buffer);

    let (cmd_tx, cmd_rx) = mpsc::channel::<StoreCommand>(config.command_capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<UiEvent>(config.command_capacity);

    tokio::spawn(state_forwarder(store_rx, evt_tx.clone()));
    tokio::spawn(command_handler(store, cmd_rx, evt_tx));

    Ok((cmd_tx, evt_rx))
}

/// Background task: forward store state changes to the TUI.
async fn state_forwarder(
    mut store_rx: mpsc::Receiver<StoreEvent>,
    evt_tx: mpsc::Sender<UiEvent>,
) {
    while let Some(StoreEvent::StateChanged(snapshot)) = store_rx.recv().await {
        if evt_tx.send(UiEvent::State(snapshot)).await.is_err() {
            // TUI dropped; exit.
            break;
        }
    }
}

/// Background task: process user intents against the store.
async fn command_handler(
    mut store: TaskStore<HttpTaskApi>,
    mut cmd_rx: mpsc::Receiver<StoreCommand>,
    evt_tx: mpsc::Sender<UiEvent>,
) {
    // Initial load, mirroring a fetch-on-mount client.
    store.fetch_all().await;

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            StoreCommand::FetchAll => store.fetch_all().await,
            StoreCommand::Add { title } => {
                if let Err(e) = store.add(&title).await {
                    match e {
                        StoreError::TitleEmpty => {
                            tracing::debug!("empty title rejected locally");
                        }
                        StoreError::Request(err) => {
                            tracing::warn!(error = %err, "add rejected");
                        }
                    }
                    let _ = evt_tx.send(UiEvent::AddRejected { title }).await;
                }
            }
            StoreCommand::Toggle { id } => store.toggle(id).await,
            StoreCommand::Shutdown => {
                tracing::info!("store worker shutting down");
                break;
            }
        }
    }
}
