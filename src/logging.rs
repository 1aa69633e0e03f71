//! Log setup.
//!
//! The terminal belongs to the TUI, so log output goes to a file. Logging is
//! best effort: if the file cannot be opened the client runs without it.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, DEFAULT_LOG_FILTER};

/// Build the filter from a directive string, falling back to the default
/// level when it does not parse.
pub fn build_env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("Invalid log filter '{}': {}", directive, e);
        EnvFilter::new(DEFAULT_LOG_FILTER)
    })
}

/// Install the global subscriber writing to `path`.
pub fn init_file_logging(path: &Path, directive: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = OpenOptions::new().create(true).append(true).open(path)?;

    let installed = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(log_file))
        .with_env_filter(build_env_filter(directive))
        .try_init();

    if installed.is_ok() {
        tracing::debug!("Logging to {}", path.display());
    }
    Ok(())
}

/// Set up logging for `config`. Failures leave logging disabled.
pub fn init(config: &AppConfig) {
    let Some(path) = config.log_path() else {
        return;
    };
    if let Err(e) = init_file_logging(&path, &config.log_filter) {
        eprintln!("Logging disabled: {}", e);
    }
}
