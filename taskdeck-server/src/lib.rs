//! Taskdeck reference task API server library.
//!
//! Exposes the in-memory task API server for use in tests and embedding.
//! The server implements the REST contract from `taskdeck-proto`: list,
//! create, get-by-id, and completion updates, all under `/api`.

pub mod config;
pub mod routes;
pub mod store;
