//! Persistence medium contracts and the session store built on top of them.
//!
//! A [`SessionBackend`] is a plain string key/value medium (the browser's local storage in
//! the original deployment). [`SessionStore`] owns one key in it and is the only code that
//! reads or writes the serialized [`UserRecord`].

pub mod file;
pub mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

// self
use crate::{_prelude::*, auth::UserRecord, obs};

/// Key holding the serialized current user.
pub const SESSION_KEY: &str = "dashboard-user";

/// String key/value persistence medium.
pub trait SessionBackend
where
	Self: Send + Sync,
{
	/// Reads the value stored under `key`, if any.
	fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

	/// Stores `value` under `key`, replacing any previous value.
	fn write(&self, key: &str, value: String) -> Result<(), StoreError>;

	/// Removes the value stored under `key`; removing a missing key is not an error.
	fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Error type produced by [`SessionBackend`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend or the store.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage medium.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Reads and writes the persisted [`UserRecord`].
#[derive(Clone)]
pub struct SessionStore {
	backend: Arc<dyn SessionBackend>,
	key: String,
}
impl SessionStore {
	/// Creates a store that keeps the session under [`SESSION_KEY`].
	pub fn new(backend: Arc<dyn SessionBackend>) -> Self {
		Self::with_key(backend, SESSION_KEY)
	}

	/// Creates a store that keeps the session under a custom key.
	pub fn with_key(backend: Arc<dyn SessionBackend>, key: impl Into<String>) -> Self {
		Self { backend, key: key.into() }
	}

	/// Loads the persisted user.
	///
	/// A value that does not deserialize into a [`UserRecord`] is treated as absent. Only a
	/// failing backend produces an error.
	pub fn load(&self) -> Result<Option<UserRecord>, StoreError> {
		let Some(raw) = self.backend.read(&self.key)? else {
			return Ok(None);
		};

		match serde_json::from_str(&raw) {
			Ok(user) => Ok(Some(user)),
			Err(e) => {
				obs::warn_discarded_session(&self.key, &e);

				Ok(None)
			},
		}
	}

	/// Serializes and persists `user`, overwriting any previous session.
	pub fn save(&self, user: &UserRecord) -> Result<(), StoreError> {
		let raw = serde_json::to_string(user).map_err(|e| StoreError::Serialization {
			message: format!("Failed to serialize session: {e}"),
		})?;

		self.backend.write(&self.key, raw)
	}

	/// Removes the persisted session.
	pub fn clear(&self) -> Result<(), StoreError> {
		self.backend.remove(&self.key)
	}

	/// Backend shared by this store.
	pub fn backend(&self) -> &Arc<dyn SessionBackend> {
		&self.backend
	}
}
impl Debug for SessionStore {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SessionStore").field("key", &self.key).finish()
	}
}
