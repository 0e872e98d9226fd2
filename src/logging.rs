//! Logger setup
//!
//! Line-mode commands log to stderr. The full-screen game logs to a file in
//! the data directory so output never lands on the alternate screen.

use anyhow::{Context, Result};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::Path;

/// Log file name inside the data directory
pub const LOG_FILE: &str = "daily_wordle.log";

/// Where log records go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    /// Append to `daily_wordle.log` in this directory
    File(&'a Path),
}

/// Install the global logger
///
/// The level comes from `RUST_LOG` when set, otherwise `warn`, or `debug`
/// with `verbose`.
///
/// # Errors
/// Returns an error if the log file cannot be opened.
pub fn init(target: LogTarget<'_>, verbose: bool) -> Result<()> {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(default_level).parse_default_env();

    if let LogTarget::File(dir) = target {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join(LOG_FILE);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    // A second init (tests, repeated runs in one process) keeps the first logger
    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
    Ok(())
}
