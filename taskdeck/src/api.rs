//! HTTP client for the remote task API.
//!
//! [`TaskApi`] is the transport seam: the state store only ever talks to
//! this trait, so tests can substitute a scripted implementation and the
//! HTTP layer can change without touching state logic. [`HttpTaskApi`] is
//! the reqwest-backed implementation of the REST contract described in
//! `taskdeck-proto`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use taskdeck_proto::task::{CreateTaskRequest, ErrorBody, Task, TaskId, UpdateTaskRequest};

/// The single failure kind for remote task operations.
///
/// Transport failures and non-2xx application responses are deliberately
/// collapsed into one error: the human-readable message is the only
/// differentiator, and that message is what the store surfaces to the UI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct RequestError(String);

impl RequestError {
    /// Creates a request error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(e: reqwest::Error) -> Self {
        Self(e.to_string())
    }
}

/// Asynchronous operations on the remote task collection.
///
/// Every operation either returns the server's authoritative view of the
/// affected task(s) or fails with a [`RequestError`].
pub trait TaskApi: Send + Sync {
    /// Fetch the full task collection in server order.
    fn list_tasks(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Task>, RequestError>> + Send;

    /// Create a task with the given title; the server assigns the id.
    fn create_task(
        &self,
        title: &str,
    ) -> impl std::future::Future<Output = Result<Task, RequestError>> + Send;

    /// Fetch a single task by id.
    fn get_task(
        &self,
        id: TaskId,
    ) -> impl std::future::Future<Output = Result<Task, RequestError>> + Send;

    /// Set a task's completion flag, returning the updated task.
    fn set_completed(
        &self,
        id: TaskId,
        completed: bool,
    ) -> impl std::future::Future<Output = Result<Task, RequestError>> + Send;
}

/// reqwest-backed [`TaskApi`] implementation.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTaskApi {
    /// Creates a client for the given base URL (e.g. `http://127.0.0.1:5103/api`).
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the base URL does not parse or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str, connect_timeout: Duration) -> Result<Self, RequestError> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| RequestError::new(format!("invalid API base URL {base_url}: {e}")))?;
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Decodes a response per the uniform contract: 2xx bodies are JSON
    /// values, anything else becomes a [`RequestError`] whose message is
    /// taken from the body's `message` field when present.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RequestError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(RequestError::new(error_message(status.as_u16(), &body)));
        }
        Ok(response.json().await?)
    }
}

/// Extracts the failure message from a non-2xx response body.
///
/// Falls back to `"HTTP <status>"` when the body is absent, not JSON, or
/// lacks a `message` field.
fn error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .map_or_else(|_| format!("HTTP {status}"), |e| e.message)
}

impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> Result<Vec<Task>, RequestError> {
        let response = self.client.get(self.url("/tasks")).send().await?;
        Self::decode(response).await
    }

    async fn create_task(&self, title: &str) -> Result<Task, RequestError> {
        let request = CreateTaskRequest {
            title: title.to_string(),
        };
        let response = self
            .client
            .post(self.url("/tasks"))
            .json(&request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get_task(&self, id: TaskId) -> Result<Task, RequestError> {
        let response = self.client.get(self.url(&format!("/tasks/{id}"))).send().await?;
        Self::decode(response).await
    }

    async fn set_completed(&self, id: TaskId, completed: bool) -> Result<Task, RequestError> {
        let request = UpdateTaskRequest { completed };
        let response = self
            .client
            .put(self.url(&format!("/tasks/{id}")))
            .json(&request)
            .send()
            .await?;
        Self::decode(response).await
    }
}
