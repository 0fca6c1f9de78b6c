//! In-memory task table.
//!
//! Holds the server-side task collection in insertion order, which is the
//! order clients see on a full list fetch. Ids are assigned from a
//! monotonically increasing counter starting at 1 and are never reused.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use taskdeck_proto::task::{Task, TaskId};

/// Thread-safe in-memory task collection.
pub struct TaskTable {
    tasks: RwLock<Vec<Task>>,
    next_id: AtomicU64,
}

impl Default for TaskTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskTable {
    /// Creates an empty table; the first assigned id is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: RwLock::const_new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Returns the full collection in insertion order.
    pub async fn list(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    /// Inserts a new task with the given (already validated) title and
    /// returns it with its assigned id. Titles are stored trimmed.
    pub async fn insert(&self, title: &str) -> Task {
        let task = Task {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: title.trim().to_string(),
            completed: false,
        };
        self.tasks.write().await.push(task.clone());
        task
    }

    /// Returns the task with the given id, if present.
    pub async fn get(&self, id: TaskId) -> Option<Task> {
        self.tasks.read().await.iter().find(|t| t.id == id).cloned()
    }

    /// Sets a task's completion flag, returning the updated task, or
    /// `None` if the id is unknown.
    pub async fn set_completed(&self, id: TaskId, completed: bool) -> Option<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = completed;
        Some(task.clone())
    }

    /// Inserts a handful of demo tasks for local development.
    pub async fn seed_demo(&self) {
        for (title, completed) in [
            ("Review the morning inbox", true),
            ("Write the weekly status note", false),
            ("Book the team retro room", false),
        ] {
            let task = self.insert(title).await;
            if completed {
                self.set_completed(task.id, true).await;
            }
        }
    }
}
