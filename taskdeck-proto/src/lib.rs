//! Shared wire types for the Taskdeck REST contract.

pub mod task;

pub use task::{
    CreateTaskRequest, ErrorBody, MAX_TITLE_LENGTH, Task, TaskId, TitleError, UpdateTaskRequest,
    validate_title,
};
