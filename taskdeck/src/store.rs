//! Client-side task state store.
//!
//! [`TaskStore`] owns the authoritative in-memory view of the task
//! collection plus its derived status flags, and serializes user intents
//! into [`TaskApi`] calls. Each operation follows the same discipline:
//! clear the error, raise the operation's in-flight flag, call the API,
//! drop the flag unconditionally once the call settles, then merge the
//! result. The store emits a [`StoreEvent`] snapshot at every transition
//! so the view layer can render in-flight states without polling.

use tokio::sync::mpsc;

use taskdeck_proto::task::{Task, TaskId};

use crate::api::{RequestError, TaskApi};

/// Errors surfaced to callers of store operations.
///
/// Only [`TaskStore::add`] propagates errors to its caller; `fetch_all` and
/// `toggle` absorb failures into the shared error flag.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// Task title is empty after trimming; no request was made.
    #[error("task title cannot be empty")]
    TitleEmpty,
    /// The underlying API call failed.
    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Plain-data view of the store for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// Current task collection, in server order with client-side appends.
    pub tasks: Vec<Task>,
    /// A full list fetch is in flight.
    pub is_loading: bool,
    /// A create request is in flight.
    pub is_saving: bool,
    /// Id of the task whose toggle is in flight, if any.
    pub updating_id: Option<TaskId>,
    /// Message of the most recent failure, if any.
    pub error: Option<String>,
}

/// State-change notifications emitted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The collection or a status flag changed; carries the full new state.
    StateChanged(StoreSnapshot),
}

/// Owns the task collection and status flags; one instance per client.
///
/// The store is single-owner by design: all operations take `&mut self`,
/// so intents are serialized and the collection is never shared mutably.
pub struct TaskStore<A> {
    api: A,
    tasks: Vec<Task>,
    is_loading: bool,
    is_saving: bool,
    updating_id: Option<TaskId>,
    error: Option<String>,
    events: mpsc::Sender<StoreEvent>,
}

impl<A: TaskApi> TaskStore<A> {
    /// Creates a store over the given API together with the receiving end
    /// of its event channel.
    pub fn new(api: A, event_buffer: usize) -> (Self, mpsc::Receiver<StoreEvent>) {
        let (event_tx, event_rx) = mpsc::channel(event_buffer);
        let store = Self {
            api,
            tasks: Vec::new(),
            is_loading: false,
            is_saving: false,
            updating_id: None,
            error: None,
            events: event_tx,
        };
        (store, event_rx)
    }

    /// Returns the current task collection.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Whether a full list fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether a create request is in flight.
    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.is_saving
    }

    /// Id of the task whose toggle is in flight, if any.
    #[must_use]
    pub const fn updating_id(&self) -> Option<TaskId> {
        self.updating_id
    }

    /// Message of the most recent failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Builds a plain-data snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            tasks: self.tasks.clone(),
            is_loading: self.is_loading,
            is_saving: self.is_saving,
            updating_id: self.updating_id,
            error: self.error.clone(),
        }
    }

    async fn emit(&self) {
        let _ = self
            .events
            .send(StoreEvent::StateChanged(self.snapshot()))
            .await;
    }

    /// Replaces the task collection with the server's full list.
    ///
    /// On failure the previous collection is left untouched and the error
    /// flag carries the failure message. The loading flag is released
    /// whichever way the call settles.
    pub async fn fetch_all(&mut self) {
        self.is_loading = true;
        self.error = None;
        self.emit().await;

        let result = self.api.list_tasks().await;
        self.is_loading = false;
        match result {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => {
                tracing::warn!(error = %e, "task list fetch failed");
                self.error = Some(e.to_string());
            }
        }
        self.emit().await;
    }

    /// Creates a task and appends the server-assigned result to the
    /// collection. No re-fetch of the full list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TitleEmpty`] without touching the network if
    /// the trimmed title is empty, or [`StoreError::Request`] if the create
    /// request fails. Either way the failure message is also stored in the
    /// error flag; the `Result` lets the caller keep the user's input.
    pub async fn add(&mut self, title: &str) -> Result<(), StoreError> {
        let title = title.trim();
        if title.is_empty() {
            self.error = Some(StoreError::TitleEmpty.to_string());
            self.emit().await;
            return Err(StoreError::TitleEmpty);
        }

        self.is_saving = true;
        self.error = None;
        self.emit().await;

        let result = self.api.create_task(title).await;
        self.is_saving = false;
        let outcome = match result {
            Ok(task) => {
                self.tasks.push(task);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "task create failed");
                self.error = Some(e.to_string());
                Err(StoreError::Request(e))
            }
        };
        self.emit().await;
        outcome
    }

    /// Toggles a task's completion state via the server.
    ///
    /// Unknown ids are a complete no-op: no request, no flag or error
    /// change. There is no optimistic mutation — the task keeps its prior
    /// state until the server's response replaces it (server wins even if
    /// the response differs from the expected negation).
    pub async fn toggle(&mut self, id: TaskId) {
        let Some(task) = self.tasks.iter().find(|t| t.id == id) else {
            return;
        };
        let next = !task.completed;

        self.updating_id = Some(id);
        self.error = None;
        self.emit().await;

        let result = self.api.set_completed(id, next).await;
        self.updating_id = None;
        match result {
            Ok(updated) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) {
                    *slot = updated;
                }
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "task toggle failed");
                self.error = Some(e.to_string());
            }
        }
        self.emit().await;
    }
}
