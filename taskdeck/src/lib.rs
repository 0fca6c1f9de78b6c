//! Taskdeck — terminal task-list client library.

pub mod api;
pub mod app;
pub mod config;
pub mod net;
pub mod store;
pub mod ui;
