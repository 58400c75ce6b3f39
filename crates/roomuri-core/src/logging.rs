//! Tracing setup for the CLI: a log file under the XDG state dir, or stderr.

use anyhow::{anyhow, Result};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,roomuri=debug,roomuri_core=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Logs to `~/.local/state/roomuri/roomuri.log`. Errors when the file cannot
/// be opened; callers fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let state_dir = xdg::BaseDirectories::with_prefix("roomuri")?.get_state_home();
    fs::create_dir_all(&state_dir)?;
    let path = state_dir.join("roomuri.log");
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))?;

    tracing::debug!(path = %path.display(), "logging to file");
    Ok(())
}

/// Logs to stderr; a no-op if a subscriber is already installed.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
