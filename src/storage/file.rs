//! @acp:module "File Store"
//! @acp:summary "JSON-file backed key/value store for state that outlives the process"
//! @acp:domain widget
//! @acp:layer io

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::KeyValueStore;
use crate::error::Result;

/// Local-storage stand-in: every write is flushed to a JSON object file.
///
/// Write failures are logged and otherwise ignored; the in-memory view
/// stays authoritative for the rest of the process.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store, reading existing entries if the file exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Open the store, starting empty if the file is unreadable
    pub fn open_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::open(path).unwrap_or_else(|e| {
            tracing::warn!("Starting with empty state, cannot read {:?}: {}", path, e);
            Self {
                path: path.to_path_buf(),
                entries: Mutex::new(BTreeMap::new()),
            }
        })
    }

    /// Default location: `<data dir>/waifu-tips/state.json`
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("waifu-tips")
            .join("state.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn write_through(&self, update: impl FnOnce(&mut BTreeMap<String, String>)) {
        let mut entries = self.entries();
        update(&mut entries);
        if let Err(e) = self.flush(&entries) {
            tracing::warn!("Failed to persist widget state to {:?}: {}", self.path, e);
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.write_through(|entries| {
            entries.insert(key.to_string(), value.to_string());
        });
    }

    fn remove(&self, key: &str) {
        self.write_through(|entries| {
            entries.remove(key);
        });
    }
}
