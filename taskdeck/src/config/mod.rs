//! Configuration system for the Taskdeck client.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/taskdeck/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::time::Duration;

/// Default base URL of the task API (local development server).
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5103/api";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    api: ApiFileConfig,
    ui: UiFileConfig,
}

/// `[api]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ApiFileConfig {
    base_url: Option<String>,
    connect_timeout_secs: Option<u64>,
    event_buffer: Option<usize>,
    command_capacity: Option<usize>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    poll_timeout_ms: Option<u64>,
    timestamp_format: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -- API --
    /// Base URL of the remote task API.
    pub api_url: String,
    /// Timeout for establishing an HTTP connection.
    pub connect_timeout: Duration,
    /// Buffer size for the store's state-change event channel.
    pub event_buffer: usize,
    /// Capacity of the command channel from the TUI to the store worker.
    pub command_capacity: usize,

    // -- UI --
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,
    /// Timestamp display format string (chrono) for the refresh indicator.
    pub timestamp_format: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            event_buffer: 64,
            command_capacity: 256,
            poll_timeout: Duration::from_millis(50),
            timestamp_format: "%H:%M".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// CLI args and env vars are parsed via `clap`. If `--config` is given
    /// and the file does not exist, returns an error. If no `--config` is
    /// given, the default path (`~/.config/taskdeck/config.toml`) is tried
    /// and silently ignored if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve a `ClientConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. This is separated from `load()` to
    /// enable unit testing without CLI parsing.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            api_url: cli
                .api_url
                .clone()
                .or_else(|| file.api.base_url.clone())
                .unwrap_or(defaults.api_url),
            connect_timeout: file
                .api
                .connect_timeout_secs
                .map_or(defaults.connect_timeout, Duration::from_secs),
            event_buffer: file.api.event_buffer.unwrap_or(defaults.event_buffer),
            command_capacity: file
                .api
                .command_capacity
                .unwrap_or(defaults.command_capacity),
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            timestamp_format: cli
                .timestamp_format
                .clone()
                .or_else(|| file.ui.timestamp_format.clone())
                .unwrap_or(defaults.timestamp_format),
        }
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal task-list client")]
pub struct CliArgs {
    /// Base URL of the remote task API.
    #[arg(long, env = "TASKDECK_API_URL")]
    pub api_url: Option<String>,

    /// Path to config file (default: `~/.config/taskdeck/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Timestamp display format (chrono format string).
    #[arg(long)]
    pub timestamp_format: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKDECK_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/taskdeck.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            // No config dir available — use defaults.
            return Ok(ConfigFile::default());
        };
        config_dir.join("taskdeck").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
