//! Synchronous string-keyed storage.
//!
//! [`KeyValueStore`] is the durable mirror behind the cart: it stores raw
//! strings and knows nothing about their encoding. Serialization is the
//! caller's job.
//!
//! [`MemoryStore`] keeps entries in memory. Clones share the same entries,
//! so a test can hand one clone to a cart and inspect the other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be stored by this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The write would exceed the store's capacity.
    #[error("storage quota of {limit} bytes exceeded")]
    QuotaExceeded {
        /// Capacity in bytes.
        limit: usize,
    },

    /// The store cannot be reached at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A durable, synchronous, string-keyed store.
pub trait KeyValueStore: Send {
    /// Read the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects or fails the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails the delete.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    writes: Vec<(String, String)>,
    quota: Option<usize>,
}

impl MemoryInner {
    fn used_bytes_with(&self, key: &str, value: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum::<usize>()
            + key.len()
            + value.len()
    }
}

/// In-memory [`KeyValueStore`].
///
/// Every successful `set` is also appended to a write log, available via
/// [`MemoryStore::writes`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    /// Create an empty, unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that holds at most `limit` bytes of keys and
    /// values combined.
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        let store = Self::default();
        store.lock().quota = Some(limit);
        store
    }

    /// Seed an entry without recording it in the write log.
    #[must_use]
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.lock()
            .entries
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Every `(key, value)` pair written through [`KeyValueStore::set`], oldest
    /// first.
    #[must_use]
    pub fn writes(&self) -> Vec<(String, String)> {
        self.lock().writes.clone()
    }

    /// The most recent value written under `key`, if any.
    #[must_use]
    pub fn last_write(&self, key: &str) -> Option<String> {
        self.lock()
            .writes
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Forget the write log, keeping the entries.
    pub fn clear_writes(&self) {
        self.lock().writes.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.lock();
        if let Some(limit) = inner.quota {
            if inner.used_bytes_with(key, value) > limit {
                return Err(StorageError::QuotaExceeded { limit });
            }
        }
        inner.entries.insert(key.to_string(), value.to_string());
        inner.writes.push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.lock().entries.remove(key);
        Ok(())
    }
}
