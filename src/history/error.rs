use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by a [`Storage`](super::Storage) backend.
#[derive(Debug, Error)]
pub enum StorageError {
	#[error("invalid storage key '{0}': use letters, digits, '_', '-' or '.'")]
	InvalidKey(String),

	#[error("storage I/O failed for {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

/// Failures raised by the [`SearchHistory`](super::SearchHistory) store.
#[derive(Debug, Error)]
pub enum HistoryError {
	#[error(transparent)]
	Storage(#[from] StorageError),

	#[error("failed to serialize search history: {0}")]
	Serialize(#[from] serde_json::Error),

	#[error("history size must be at least 1")]
	ZeroCapacity,
}
