//! Driven port for the visitor-scoped key-value store.
//!
//! The contact cooldown keeps one timestamp per visitor. Production wires a
//! store backed by the visitor's session cookie, so the record is as durable
//! (and as easy to clear) as browser-local storage. Tests inject
//! [`InMemoryKeyValueStore`].
//!
//! The trait is synchronous and not `Send`: implementations may wrap
//! request-local state.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::define_port_error;

define_port_error! {
    /// Errors raised by key-value store adapters.
    pub enum KeyValueStoreError {
        /// The stored value could not be read.
        Read { message: String } => "key-value store read failed: {message}",
        /// The value could not be written.
        Write { message: String } => "key-value store write failed: {message}",
    }
}

/// String key-value storage scoped to one visitor.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Fetch the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;
}

/// Process-local store for tests and tooling.
///
/// # Examples
/// ```
/// use site_backend::domain::ports::{InMemoryKeyValueStore, KeyValueStore};
///
/// let store = InMemoryKeyValueStore::default();
/// store.set("k", "v").expect("in-memory write");
/// assert_eq!(store.get("k").expect("in-memory read").as_deref(), Some("v"));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, String> {
        self.entries
            .lock()
            .map_err(|_| "in-memory store mutex poisoned".to_owned())
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let entries = self.lock().map_err(KeyValueStoreError::read)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let mut entries = self.lock().map_err(KeyValueStoreError::write)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
