//! Tracing setup for the terminal application.
//!
//! The UI owns the terminal, so log output goes to a file in the data
//! directory instead of stderr. Filtering follows `DOCSEEK_LOG` using the
//! usual `EnvFilter` syntax and defaults to `info`.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "DOCSEEK_LOG";
pub const LOG_FILE_NAME: &str = "docseek.log";
const DEFAULT_FILTER: &str = "info";

/// Build the filter from `DOCSEEK_LOG`, falling back to `info`.
fn env_filter() -> EnvFilter {
	EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a global subscriber appending to `<dir>/docseek.log`.
///
/// Returns the log path. Calling this twice keeps the first subscriber.
pub fn initialize(dir: &Path) -> Result<PathBuf> {
	fs::create_dir_all(dir)
		.with_context(|| format!("failed to create log directory {}", dir.display()))?;
	let path = dir.join(LOG_FILE_NAME);
	let file = OpenOptions::new()
		.create(true)
		.append(true)
		.open(&path)
		.with_context(|| format!("failed to open log file {}", path.display()))?;

	let installed = tracing_subscriber::fmt()
		.with_env_filter(env_filter())
		.with_writer(Mutex::new(file))
		.with_ansi(false)
		.with_target(false)
		.try_init()
		.is_ok();
	if installed {
		tracing::debug!(path = %path.display(), "logging initialised");
	}
	Ok(path)
}
