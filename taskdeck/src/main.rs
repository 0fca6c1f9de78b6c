//! Taskdeck — terminal task-list client.
//!
//! Renders the task collection from a remote task API, lets the user add
//! tasks and toggle completion, and reflects loading/saving/error states.
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/taskdeck/config.toml`).
//!
//! ```bash
//! # Against the local development server (default base URL)
//! cargo run --bin taskdeck
//!
//! # Against another API
//! cargo run --bin taskdeck -- --api-url http://tasks.example.com/api
//!
//! # Or via environment variable
//! TASKDECK_API_URL=http://tasks.example.com/api cargo run --bin taskdeck
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use taskdeck::app::App;
use taskdeck::config::{CliArgs, ClientConfig};
use taskdeck::net::{self, StoreCommand, UiEvent};
use taskdeck::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > env > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(api_url = %config.api_url, "taskdeck starting");

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, &config);

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskdeck exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskdeck.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
///
/// Spawns the store worker (which performs the initial fetch), then on each
/// tick: draw the UI, drain pending worker events, poll for key input, and
/// dispatch any resulting store command.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new(&config.timestamp_format);

    let (cmd_tx, mut evt_rx) = match net::spawn_store(config) {
        Ok(handles) => handles,
        Err(e) => {
            tracing::error!(error = %e, "failed to start store worker");
            return Err(io::Error::other(e.to_string()));
        }
    };

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        drain_ui_events(&mut app, &mut evt_rx);

        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let Some(cmd) = app.handle_key_event(key) {
                match cmd_tx.try_send(cmd) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        tracing::warn!("command channel full, intent dropped");
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => {
                        tracing::error!("store worker gone");
                        app.should_quit = true;
                    }
                }
            }
        }

        if app.should_quit {
            let _ = cmd_tx.try_send(StoreCommand::Shutdown);
            return Ok(());
        }
    }
}

/// Drain all pending worker events and apply them to the app.
fn drain_ui_events(app: &mut App, rx: &mut mpsc::Receiver<UiEvent>) {
    while let Ok(event) = rx.try_recv() {
        app.apply_event(event);
    }
}
