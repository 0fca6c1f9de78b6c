//! Property-based tests for task store operations.
//!
//! Uses proptest to verify structural invariants over arbitrary task
//! collections:
//! 1. Toggling one task never disturbs any other task.
//! 2. Adding appends exactly one task and preserves existing order.
//! 3. A full fetch adopts the backend's collection verbatim.
//! 4. Whitespace-only titles are rejected without a backend call.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use proptest::prelude::*;
use taskdeck::api::{RequestError, TaskApi};
use taskdeck::store::TaskStore;
use taskdeck_proto::task::Task;

// --- Deterministic in-memory backend ---

/// [`TaskApi`] backed by a plain vector, mimicking the server's id
/// assignment and completion updates. Counts calls so tests can assert
/// an operation never touched the network.
struct FakeBackend {
    tasks: Mutex<Vec<Task>>,
    next_id: AtomicU64,
    calls: AtomicUsize,
}

impl FakeBackend {
    fn new(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id + 1).max().unwrap_or(1);
        Self {
            tasks: Mutex::new(tasks),
            next_id: AtomicU64::new(next_id),
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TaskApi for &FakeBackend {
    async fn list_tasks(&self) -> Result<Vec<Task>, RequestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn create_task(&self, title: &str) -> Result<Task, RequestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let task = Task {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: title.to_string(),
            completed: false,
        };
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn get_task(&self, id: u64) -> Result<Task, RequestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| RequestError::new(format!("task {id} not found")))
    }

    async fn set_completed(&self, id: u64, completed: bool) -> Result<Task, RequestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| RequestError::new(format!("task {id} not found")))?;
        task.completed = completed;
        Ok(task.clone())
    }
}

// --- Strategies ---

/// Arbitrary task collections with sequential ids and printable titles.
fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(("[a-zA-Z0-9 ]{1,40}", any::<bool>()), 0..16).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (title, completed))| Task {
                id: (i + 1) as u64,
                title,
                completed,
            })
            .collect()
    })
}

/// Non-empty collections paired with a valid index into them.
fn arb_tasks_with_index() -> impl Strategy<Value = (Vec<Task>, usize)> {
    prop::collection::vec(("[a-zA-Z0-9 ]{1,40}", any::<bool>()), 1..16).prop_flat_map(|entries| {
        let len = entries.len();
        let tasks: Vec<Task> = entries
            .into_iter()
            .enumerate()
            .map(|(i, (title, completed))| Task {
                id: (i + 1) as u64,
                title,
                completed,
            })
            .collect();
        (Just(tasks), 0..len)
    })
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("failed to build runtime")
        .block_on(future)
}

// --- Properties ---

proptest! {
    /// Toggling one task flips exactly that task and leaves every other
    /// task byte-for-byte identical.
    #[test]
    fn toggle_disturbs_only_the_target((tasks, index) in arb_tasks_with_index()) {
        block_on(async {
            let backend = FakeBackend::new(tasks.clone());
            let (mut store, _events) = TaskStore::new(&backend, 64);
            store.fetch_all().await;

            let target = tasks[index].clone();
            store.toggle(target.id).await;

            prop_assert_eq!(store.tasks().len(), tasks.len());
            for (before, after) in tasks.iter().zip(store.tasks()) {
                if before.id == target.id {
                    prop_assert_eq!(after.completed, !before.completed);
                    prop_assert_eq!(&after.title, &before.title);
                } else {
                    prop_assert_eq!(after, before);
                }
            }
            Ok(())
        })?;
    }

    /// Adding appends exactly one task at the end without reordering or
    /// rewriting any existing task.
    #[test]
    fn add_appends_without_reordering(tasks in arb_tasks(), title in "[a-zA-Z0-9 ]{1,40}[a-zA-Z0-9]") {
        block_on(async {
            let backend = FakeBackend::new(tasks.clone());
            let (mut store, _events) = TaskStore::new(&backend, 64);
            store.fetch_all().await;

            store
                .add(&title)
                .await
                .map_err(|e| proptest::test_runner::TestCaseError::fail(e.to_string()))?;

            prop_assert_eq!(store.tasks().len(), tasks.len() + 1);
            for (before, after) in tasks.iter().zip(store.tasks()) {
                prop_assert_eq!(after, before);
            }
            let appended = store
                .tasks()
                .last()
                .ok_or_else(|| proptest::test_runner::TestCaseError::fail("no appended task"))?;
            prop_assert_eq!(&appended.title, &title.trim().to_string());
            prop_assert!(!appended.completed);
            prop_assert!(appended.id > tasks.iter().map(|t| t.id).max().unwrap_or(0));
            Ok(())
        })?;
    }

    /// A full fetch adopts the backend collection exactly, in its order.
    #[test]
    fn fetch_adopts_backend_order(tasks in arb_tasks()) {
        block_on(async {
            let backend = FakeBackend::new(tasks.clone());
            let (mut store, _events) = TaskStore::new(&backend, 64);

            store.fetch_all().await;

            prop_assert_eq!(store.tasks(), tasks.as_slice());
            prop_assert!(!store.is_loading());
            prop_assert!(store.error().is_none());
            Ok(())
        })?;
    }

    /// Whitespace-only input is rejected locally: the backend is never
    /// called and the collection is untouched.
    #[test]
    fn blank_titles_never_touch_the_backend(tasks in arb_tasks(), blanks in "[ \t]{0,10}") {
        block_on(async {
            let backend = FakeBackend::new(tasks.clone());
            let (mut store, _events) = TaskStore::new(&backend, 64);
            store.fetch_all().await;
            let calls_after_fetch = backend.call_count();

            prop_assert!(store.add(&blanks).await.is_err());

            prop_assert_eq!(backend.call_count(), calls_after_fetch);
            prop_assert_eq!(store.tasks(), tasks.as_slice());
            Ok(())
        })?;
    }
}
