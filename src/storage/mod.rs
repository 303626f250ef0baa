//! @acp:module "Storage"
//! @acp:summary "Key/value port for session and persisted widget state"
//! @acp:domain widget
//! @acp:layer io
//!
//! The widget keeps three independent scalars: the dismiss timestamp and
//! the model rotation index in local storage, and the displayed message
//! priority in session storage. No schema versioning.

mod file;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

pub use file::FileStore;

/// Dismiss timestamp (ms since epoch), local storage
pub const DISMISS_KEY: &str = "waifu-display";
/// Priority of the message on screen, session storage
pub const PRIORITY_KEY: &str = "waifu-text";
/// Model rotation index, local storage
pub const MODEL_INDEX_KEY: &str = "modelId";

/// Minimal string key/value storage, shared by every part of the page
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn remove(&self, key: &str);
}

/// Process-lifetime storage; stands in for session storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get(MODEL_INDEX_KEY), None);

        store.set(MODEL_INDEX_KEY, "2");
        assert_eq!(store.get(MODEL_INDEX_KEY).as_deref(), Some("2"));

        store.remove(MODEL_INDEX_KEY);
        assert_eq!(store.get(MODEL_INDEX_KEY), None);
    }
}
