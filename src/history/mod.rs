//! Bounded most-recently-used list of opened search results.
//!
//! The whole list lives under one storage key as a JSON array, newest first.
//! Entries are unique by id and the list never grows past its configured
//! capacity. Content that fails to parse is treated as an empty history and
//! is replaced on the next write.

mod error;
mod storage;

use tracing::{debug, warn};

pub use error::{HistoryError, StorageError};
pub use storage::{FileStorage, MemoryStorage, Storage, validate_key};

use crate::types::{HistoryEntry, SearchResult};

/// Storage key used when none is configured.
pub const SEARCH_HISTORY_KEY: &str = "search_history";

/// Number of entries kept when no capacity is configured.
pub const SEARCH_HISTORY_MAX_SIZE: usize = 8;

/// Search history persisted through an injected [`Storage`].
#[derive(Debug)]
pub struct SearchHistory<S> {
	storage: S,
	key: String,
	max_size: usize,
}

impl<S: Storage> SearchHistory<S> {
	/// Create a store using the default key and capacity.
	pub fn new(storage: S) -> Self {
		Self {
			storage,
			key: SEARCH_HISTORY_KEY.to_string(),
			max_size: SEARCH_HISTORY_MAX_SIZE,
		}
	}

	/// Create a store with an explicit key and capacity.
	pub fn with_options(
		storage: S,
		key: impl Into<String>,
		max_size: usize,
	) -> Result<Self, HistoryError> {
		if max_size == 0 {
			return Err(HistoryError::ZeroCapacity);
		}
		let key = key.into();
		validate_key(&key)?;
		Ok(Self {
			storage,
			key,
			max_size,
		})
	}

	#[must_use]
	pub fn key(&self) -> &str {
		&self.key
	}

	#[must_use]
	pub fn max_size(&self) -> usize {
		self.max_size
	}

	#[must_use]
	pub fn storage(&self) -> &S {
		&self.storage
	}

	/// Move `result` to the front of the history, stripped of its text.
	pub fn record(&self, result: &SearchResult) -> Result<(), HistoryError> {
		let entry = HistoryEntry::from_result(result);
		let mut entries = self.list()?;
		entries.retain(|existing| existing.id() != entry.id());
		entries.insert(0, entry);
		entries.truncate(self.max_size);

		let serialized = serde_json::to_string(&entries)?;
		self.storage.set(&self.key, &serialized)?;
		debug!(id = %result.id, len = entries.len(), "recorded search history entry");
		Ok(())
	}

	/// Read the persisted history, newest first.
	pub fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
		let Some(raw) = self.storage.get(&self.key)? else {
			return Ok(Vec::new());
		};
		if raw.trim().is_empty() {
			return Ok(Vec::new());
		}

		match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
			Ok(entries) => Ok(normalize(entries, self.max_size)),
			Err(err) => {
				warn!(key = %self.key, error = %err, "ignoring malformed search history");
				Ok(Vec::new())
			}
		}
	}

	/// Delete the persisted history.
	pub fn clear(&self) -> Result<(), HistoryError> {
		self.storage.remove(&self.key)?;
		debug!(key = %self.key, "cleared search history");
		Ok(())
	}
}

/// Enforce the store invariants on content written by someone else.
fn normalize(entries: Vec<HistoryEntry>, max_size: usize) -> Vec<HistoryEntry> {
	let mut seen = std::collections::HashSet::new();
	entries
		.into_iter()
		.map(HistoryEntry::sanitized)
		.filter(|entry| seen.insert(entry.id().to_string()))
		.take(max_size)
		.collect()
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;
	use crate::types::{Highlight, TextSpan};

	fn result(id: &str) -> SearchResult {
		SearchResult::new(id, format!("Title {id}"))
			.with_doc_text("body text")
			.with_highlight(Highlight::new(vec![TextSpan::hit("x")]))
	}

	fn ids(history: &SearchHistory<MemoryStorage>) -> Vec<String> {
		history
			.list()
			.unwrap()
			.iter()
			.map(|entry| entry.id().to_string())
			.collect()
	}

	#[test]
	fn empty_storage_lists_nothing() {
		let history = SearchHistory::new(MemoryStorage::new());
		assert!(history.list().unwrap().is_empty());
	}

	#[test]
	fn record_strips_text_fields() {
		let history = SearchHistory::new(MemoryStorage::new());
		history.record(&result("a")).unwrap();

		let stored = history.list().unwrap();
		assert_eq!(stored.len(), 1);
		assert_eq!(stored[0].title(), "Title a");
		assert!(stored[0].as_result().doc_text.is_empty());
		assert!(stored[0].as_result().highlights.is_empty());

		let raw = history.storage().get(SEARCH_HISTORY_KEY).unwrap().unwrap();
		assert!(!raw.contains("body text"));
	}

	#[test]
	fn re_recording_moves_to_front_without_growing() {
		let history = SearchHistory::new(MemoryStorage::new());
		history.record(&result("a")).unwrap();
		history.record(&result("b")).unwrap();
		history.record(&result("a")).unwrap();
		assert_eq!(ids(&history), vec!["a", "b"]);
	}

	#[test]
	fn oldest_entry_is_evicted_at_capacity() {
		let history = SearchHistory::with_options(MemoryStorage::new(), "h", 2).unwrap();
		history.record(&result("a")).unwrap();
		history.record(&result("b")).unwrap();
		history.record(&result("c")).unwrap();
		assert_eq!(ids(&history), vec!["c", "b"]);
	}

	#[test]
	fn clear_then_list_is_empty() {
		let history = SearchHistory::new(MemoryStorage::new());
		history.record(&result("a")).unwrap();
		history.clear().unwrap();
		assert!(history.list().unwrap().is_empty());
		assert!(history.storage().is_empty());
	}

	#[test]
	fn malformed_content_falls_back_to_empty_and_is_replaced() {
		let storage = MemoryStorage::new();
		storage.set(SEARCH_HISTORY_KEY, "{not json").unwrap();
		let history = SearchHistory::new(storage);
		assert!(history.list().unwrap().is_empty());

		history.record(&result("a")).unwrap();
		assert_eq!(ids(&history), vec!["a"]);
	}

	#[test]
	fn foreign_content_is_normalized_on_read() {
		let storage = MemoryStorage::new();
		storage
			.set(
				"h",
				r#"[{"_id":"a","title":"A","doc_text":"leak"},{"_id":"a","title":"dup"},{"_id":"b"},{"_id":"c"}]"#,
			)
			.unwrap();
		let history = SearchHistory::with_options(storage, "h", 2).unwrap();
		let entries = history.list().unwrap();
		assert_eq!(entries.len(), 2);
		assert_eq!(entries[0].title(), "A");
		assert!(entries[0].as_result().doc_text.is_empty());
		assert_eq!(entries[1].id(), "b");
	}

	#[test]
	fn rejects_zero_capacity_and_bad_keys() {
		assert!(matches!(
			SearchHistory::with_options(MemoryStorage::new(), "h", 0),
			Err(HistoryError::ZeroCapacity)
		));
		assert!(matches!(
			SearchHistory::with_options(MemoryStorage::new(), "a/b", 3),
			Err(HistoryError::Storage(StorageError::InvalidKey(_)))
		));
	}

	proptest! {
		#[test]
		fn history_stays_bounded_unique_and_recent_first(
			max_size in 1usize..6,
			ops in proptest::collection::vec(0u8..10, 0..40),
		) {
			let history = SearchHistory::with_options(MemoryStorage::new(), "h", max_size).unwrap();
			for op in &ops {
				history.record(&result(&op.to_string())).unwrap();
			}
			let listed = ids(&history);

			prop_assert!(listed.len() <= max_size);
			let unique: std::collections::HashSet<_> = listed.iter().collect();
			prop_assert_eq!(unique.len(), listed.len());

			let mut expected = Vec::new();
			for op in ops.iter().rev() {
				let id = op.to_string();
				if !expected.contains(&id) {
					expected.push(id);
				}
			}
			expected.truncate(max_size);
			prop_assert_eq!(listed, expected);
		}
	}
}
