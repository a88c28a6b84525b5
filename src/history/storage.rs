//! Key-value storage port used by the history store.
//!
//! The history never talks to the filesystem directly. It is handed a
//! [`Storage`] implementation at construction, which keeps the store testable
//! with [`MemoryStorage`] and lets the binary persist with [`FileStorage`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::error::StorageError;

/// Minimal persistent string store addressed by key.
pub trait Storage {
	/// Return the stored value, or `None` when the key is absent.
	fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

	/// Store `value` under `key`, replacing any previous value.
	fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

	/// Delete the value under `key`. Removing a missing key is not an error.
	fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for &S {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		(**self).get(key)
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		(**self).set(key, value)
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		(**self).remove(key)
	}
}

impl<S: Storage + ?Sized> Storage for Box<S> {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		(**self).get(key)
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		(**self).set(key, value)
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		(**self).remove(key)
	}
}

/// Reject keys that cannot safely name a file.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
	let valid = !key.is_empty()
		&& key != "."
		&& key != ".."
		&& key
			.chars()
			.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.'));
	if valid {
		Ok(())
	} else {
		Err(StorageError::InvalidKey(key.to_string()))
	}
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
	dir: PathBuf,
}

impl FileStorage {
	/// Create a storage rooted at `dir`. The directory is created lazily on
	/// first write.
	#[must_use]
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	#[must_use]
	pub fn dir(&self) -> &Path {
		&self.dir
	}

	/// Path of the file backing `key`.
	pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
		validate_key(key)?;
		Ok(self.dir.join(format!("{key}.json")))
	}
}

impl Storage for FileStorage {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		let path = self.path_for(key)?;
		match fs::read_to_string(&path) {
			Ok(contents) => Ok(Some(contents)),
			Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
			Err(source) => Err(StorageError::Io { path, source }),
		}
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		let path = self.path_for(key)?;
		fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
			path: self.dir.clone(),
			source,
		})?;

		// Write beside the target and rename so readers never see a torn file.
		let staging = self.dir.join(format!(".{key}.json.tmp"));
		let write = || -> io::Result<()> {
			let mut file = fs::File::create(&staging)?;
			file.write_all(value.as_bytes())?;
			file.sync_all()?;
			fs::rename(&staging, &path)
		};
		write().map_err(|source| {
			let _ = fs::remove_file(&staging);
			StorageError::Io {
				path: path.clone(),
				source,
			}
		})
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		let path = self.path_for(key)?;
		match fs::remove_file(&path) {
			Ok(()) => Ok(()),
			Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
			Err(source) => Err(StorageError::Io { path, source }),
		}
	}
}

/// Process-local storage backed by a map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
	entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of keys currently stored.
	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.borrow().len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}
}

impl Storage for MemoryStorage {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		validate_key(key)?;
		Ok(self.entries.borrow().get(key).cloned())
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		validate_key(key)?;
		self.entries
			.borrow_mut()
			.insert(key.to_string(), value.to_string());
		Ok(())
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		validate_key(key)?;
		self.entries.borrow_mut().remove(key);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use tempfile::tempdir;

	use super::*;

	#[test]
	fn file_storage_round_trips_and_removes() {
		let dir = tempdir().unwrap();
		let storage = FileStorage::new(dir.path().join("nested"));

		assert_eq!(storage.get("history").unwrap(), None);
		storage.set("history", "[1,2]").unwrap();
		assert_eq!(storage.get("history").unwrap().as_deref(), Some("[1,2]"));
		assert!(dir.path().join("nested/history.json").exists());

		storage.remove("history").unwrap();
		assert_eq!(storage.get("history").unwrap(), None);
		storage.remove("history").expect("removing twice is fine");
	}

	#[test]
	fn file_storage_overwrites_without_leaving_staging_files() {
		let dir = tempdir().unwrap();
		let storage = FileStorage::new(dir.path());
		storage.set("k", "one").unwrap();
		storage.set("k", "two").unwrap();
		assert_eq!(storage.get("k").unwrap().as_deref(), Some("two"));
		let names: Vec<_> = fs::read_dir(dir.path())
			.unwrap()
			.map(|entry| entry.unwrap().file_name())
			.collect();
		assert_eq!(names, vec![std::ffi::OsString::from("k.json")]);
	}

	#[test]
	fn rejects_path_like_keys() {
		let storage = FileStorage::new("/tmp/unused");
		assert!(matches!(
			storage.get("../escape"),
			Err(StorageError::InvalidKey(_))
		));
		assert!(matches!(validate_key(""), Err(StorageError::InvalidKey(_))));
		assert!(validate_key("search_history-v1.0").is_ok());
	}

	#[test]
	fn memory_storage_behaves_like_a_map() {
		let storage = MemoryStorage::new();
		storage.set("a", "1").unwrap();
		assert_eq!(storage.len(), 1);
		assert_eq!(storage.get("a").unwrap().as_deref(), Some("1"));
		storage.remove("a").unwrap();
		assert!(storage.is_empty());
	}
}
