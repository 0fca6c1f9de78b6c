//! Taskdeck task API server -- in-memory reference backend.
//!
//! An axum HTTP server exposing the task REST API under `/api`. Tasks live
//! in memory only; restarting the server clears the collection.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 127.0.0.1:5103
//! cargo run --bin taskdeck-server
//!
//! # Run on custom address
//! cargo run --bin taskdeck-server -- --bind 127.0.0.1:8080
//!
//! # Or via environment variable
//! TASKDECK_SERVER_ADDR=127.0.0.1:8080 cargo run --bin taskdeck-server
//! ```

use std::sync::Arc;

use clap::Parser;
use taskdeck_server::config::{ServerCliArgs, ServerConfig};
use taskdeck_server::routes::{self, ServerState};

#[tokio::main]
async fn main() {
    let cli = ServerCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match ServerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, "starting taskdeck task API server");

    let state = Arc::new(ServerState::new());
    if config.seed_demo {
        state.tasks.seed_demo().await;
        tracing::info!("seeded demo tasks");
    }

    match routes::start_server_with_state(&config.bind_addr, state).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "task API server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "task API server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start task API server");
            std::process::exit(1);
        }
    }
}
