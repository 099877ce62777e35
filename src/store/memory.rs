//! Thread-safe in-memory [`SessionBackend`] for tests and demos.

// self
use crate::{
	_prelude::*,
	store::{SessionBackend, StoreError},
};

type EntryMap = Arc<RwLock<HashMap<String, String>>>;

/// In-process key/value medium; clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend(EntryMap);
impl MemoryBackend {
	/// Number of stored keys.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when nothing is stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl SessionBackend for MemoryBackend {
	fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
		Ok(self.0.read().get(key).cloned())
	}

	fn write(&self, key: &str, value: String) -> Result<(), StoreError> {
		self.0.write().insert(key.to_owned(), value);

		Ok(())
	}

	fn remove(&self, key: &str) -> Result<(), StoreError> {
		self.0.write().remove(key);

		Ok(())
	}
}
