//! Key-value storage backends.
//!
//! The analytics layer talks to persistence only through [`KeyValueStore`],
//! so the same code runs against the on-disk [`SqliteStore`], the in-memory
//! [`MemoryStore`] used in tests, or [`UnavailableStore`] when no backend
//! could be opened.

pub mod migrations;
pub mod schema;
mod sqlite;

use std::collections::BTreeMap;

use crate::error::{Error, Result};

pub use sqlite::SqliteStore;

/// Get/set/remove string values by key.
///
/// Implementations report failures as errors; deciding what to do about them
/// is left to the caller.
pub trait KeyValueStore: std::fmt::Debug {
    /// Read the value stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// In-memory store with no persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A store that fails every operation.
///
/// Stands in for a backend that could not be opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    /// Create a store that reports `reason` on every call.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Why the real backend is missing.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    fn error(&self) -> Error {
        Error::unavailable(self.reason.clone())
    }
}

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(self.error())
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(self.error())
    }

    fn remove(&mut self, _key: &str) -> Result<()> {
        Err(self.error())
    }
}
