//! Task types as they appear on the wire.
//!
//! The REST contract exchanges plain JSON objects; these structs pin the
//! field names so client and server cannot drift apart:
//!
//! | Operation     | Method | Path          | Request body           | Success body  |
//! |---------------|--------|---------------|------------------------|---------------|
//! | list          | GET    | /tasks        | —                      | array of Task |
//! | create        | POST   | /tasks        | `{"title": ...}`       | Task          |
//! | get by id     | GET    | /tasks/{id}   | —                      | Task          |
//! | update status | PUT    | /tasks/{id}   | `{"completed": ...}`   | Task          |
//!
//! Non-2xx responses optionally carry an [`ErrorBody`] with a `message`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique task identifier, assigned by the server and immutable once created.
pub type TaskId = u64;

/// Maximum allowed task title length in characters.
pub const MAX_TITLE_LENGTH: usize = 256;

/// A unit of work: server-assigned id, title, and completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned unique identifier.
    pub id: TaskId,
    /// Task title (non-empty after trimming).
    pub title: String,
    /// Whether the task has been completed.
    pub completed: bool,
}

/// Request body for `POST /tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Title of the task to create.
    pub title: String,
}

/// Request body for `PUT /tasks/{id}` — a partial update of the
/// completion flag only. The title is never edited over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    /// New completion state.
    pub completed: bool,
}

/// Optional JSON body carried by non-2xx responses.
///
/// Deserialization is tolerant: unknown fields are ignored, and callers
/// fall back to a generic `HTTP <status>` message when the body is absent
/// or not valid JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub message: String,
}

/// Errors from server-side title validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TitleError {
    /// Task title cannot be empty after trimming.
    #[error("task title cannot be empty")]
    Empty,
    /// Task title exceeds the maximum length.
    #[error("task title too long (max {MAX_TITLE_LENGTH} characters)")]
    TooLong,
}

/// Validates a task title against the wire contract's bounds.
///
/// The title is checked after trimming; length is counted in characters,
/// not bytes.
///
/// # Errors
///
/// Returns [`TitleError::Empty`] for blank titles and [`TitleError::TooLong`]
/// for titles over [`MAX_TITLE_LENGTH`] characters.
pub fn validate_title(title: &str) -> Result<(), TitleError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TitleError::Empty);
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(TitleError::TooLong);
    }
    Ok(())
}
