//! HTTP routes and server startup.
//!
//! Maps the REST contract onto axum handlers backed by the shared
//! [`TaskTable`]. All endpoints live under `/api` and speak JSON; error
//! responses carry an [`ErrorBody`] so clients can surface a message.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use taskdeck_proto::task::{CreateTaskRequest, ErrorBody, Task, TaskId, UpdateTaskRequest};

use crate::store::TaskTable;

/// Shared server state handed to every handler.
pub struct ServerState {
    /// Backing task collection.
    pub tasks: TaskTable,
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerState {
    /// Creates server state with an empty task table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: TaskTable::new(),
        }
    }
}

/// A failed request, rendered as a status code plus JSON error body.
enum ApiFailure {
    /// 400 with a validation message.
    BadRequest(String),
    /// 404 for an unknown task id.
    NotFound(TaskId),
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::NotFound(id) => (StatusCode::NOT_FOUND, format!("task {id} not found")),
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}

/// Builds the application router with all task routes mounted under `/api`.
pub fn router(state: Arc<ServerState>) -> axum::Router {
    let api = axum::Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", get(get_task).put(update_task))
        .with_state(state);
    axum::Router::new().nest("/api", api)
}

/// `GET /api/tasks` — returns every task in insertion order.
async fn list_tasks(State(state): State<Arc<ServerState>>) -> Json<Vec<Task>> {
    Json(state.tasks.list().await)
}

/// `POST /api/tasks` — creates a task from a validated title, returns 201.
async fn create_task(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiFailure> {
    taskdeck_proto::validate_title(&req.title)
        .map_err(|e| ApiFailure::BadRequest(e.to_string()))?;
    let task = state.tasks.insert(&req.title).await;
    tracing::info!(id = task.id, title = %task.title, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// `GET /api/tasks/{id}` — returns a single task or 404.
async fn get_task(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<TaskId>,
) -> Result<Json<Task>, ApiFailure> {
    state
        .tasks
        .get(id)
        .await
        .map(Json)
        .ok_or(ApiFailure::NotFound(id))
}

/// `PUT /api/tasks/{id}` — updates the completion flag, returns the new state.
async fn update_task(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<TaskId>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiFailure> {
    let task = state
        .tasks
        .set_completed(id, req.completed)
        .await
        .ok_or(ApiFailure::NotFound(id))?;
    tracing::info!(id = task.id, completed = task.completed, "task updated");
    Ok(Json(task))
}

/// Starts the task API server on the given address and returns the bound
/// address and a join handle.
///
/// This is the primary entry point used by both `main.rs` and test code.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_state(addr, Arc::new(ServerState::new())).await
}

/// Starts the task API server with pre-configured [`ServerState`].
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<ServerState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "task API server error");
        }
    });

    Ok((bound_addr, handle))
}
