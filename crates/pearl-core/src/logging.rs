//! File logging for TUI applications.
//!
//! A full-screen program owns stdout, so `tracing` output goes to a file.
//! The filter honours `RUST_LOG` and defaults to `info`.

use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Errors from [`init_file_logging`].
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("cannot open log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Install a global `tracing` subscriber that appends to `path`.
///
/// # Example
///
/// ```no_run
/// pearl_core::logging::init_file_logging("pearl.log").unwrap();
/// tracing::info!("started");
/// ```
pub fn init_file_logging(path: impl AsRef<Path>) -> Result<(), LoggingError> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unopenable_path_is_an_io_error() {
        let err = init_file_logging("/nonexistent-dir/pearl/test.log").unwrap_err();
        assert!(matches!(err, LoggingError::Io(_)));
    }
}
