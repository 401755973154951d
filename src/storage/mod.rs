//! Durable key-value storage for session state.
//!
//! Two independent keys are used: [`HISTORY_KEY`] holds the serialized
//! history collection and [`DARK_MODE_KEY`] the dark-mode preference.
//!
//! # Error Handling Strategy
//!
//! Storage failures are never fatal to the operation they accompany:
//!
//! - **Write failures** are returned as [`StorageError`] next to the result of
//!   the in-memory mutation, which has already happened and is not rolled back.
//! - **Read failures and malformed values** at load time degrade to defaults
//!   (empty history, light mode) and are logged with `tracing::warn!`.

pub mod file;
pub mod memory;

use std::io;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key holding the serialized history collection
pub const HISTORY_KEY: &str = "history";
/// Key holding the serialized dark-mode flag
pub const DARK_MODE_KEY: &str = "darkMode";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),

    #[error("failed to read '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove '{key}': {source}")]
    Remove {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Storage collaborator shared by the history store and preferences.
///
/// Implementations use interior mutability so one instance can be shared
/// behind an `Arc`.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Deleting a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Result of an in-memory mutation paired with the outcome of persisting it.
///
/// The mutation itself always took effect; `persist_error` reports whether
/// the durable copy could be brought in line.
#[derive(Debug)]
pub struct Written<T> {
    pub value: T,
    pub persist_error: Option<StorageError>,
}

impl<T> Written<T> {
    pub fn new(value: T, persisted: Result<(), StorageError>) -> Self {
        Self { value, persist_error: persisted.err() }
    }

    pub fn is_durable(&self) -> bool {
        self.persist_error.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
