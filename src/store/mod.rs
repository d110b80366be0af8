//! Persistence Port
//!
//! Key-value slots that survive reloads. The browser front-end backs this with
//! `localStorage`, the terminal client with a JSON file, tests with memory.

#[cfg(feature = "native")]
mod file;

#[cfg(feature = "native")]
pub use file::FileStore;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::{StoreError, StoreResult};

/// Slot holding the session identifier
pub const SESSION_KEY: &str = "insightx_session";

/// Slot holding the serialized message list
pub const MESSAGES_KEY: &str = "insightx_messages";

/// Opaque string slots with get/set/remove semantics
///
/// Methods take `&self`; backends provide their own interior mutability, the
/// same way browser storage does.
pub trait KeyValueStore {
    /// Read a slot. Missing slots and unreadable backends both yield `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a slot, replacing any previous value
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete a slot. Removing a missing slot is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// In-memory store
///
/// Clones share the same slots, so a clone stands in for "the same browser
/// after a reload".
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a slot is present
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k"), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v2"));

        store.remove("k").unwrap();
        assert!(!store.contains("k"));

        // Removing again is fine
        store.remove("k").unwrap();
    }

    #[test]
    fn test_clones_share_slots() {
        let store = MemoryStore::new();
        let reloaded = store.clone();

        store.set(SESSION_KEY, "abc").unwrap();
        assert_eq!(reloaded.get(SESSION_KEY).as_deref(), Some("abc"));
    }

    #[test]
    fn test_store_through_reference() {
        fn write<S: KeyValueStore>(store: S) {
            store.set(MESSAGES_KEY, "[]").unwrap();
        }

        let store = MemoryStore::new();
        write(&store);
        assert!(store.contains(MESSAGES_KEY));
    }
}
