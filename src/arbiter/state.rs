//! @acp:module "Display State"
//! @acp:summary "Session-scoped priority of the message currently on screen"
//! @acp:domain widget
//! @acp:layer model

use crate::storage::{KeyValueStore, PRIORITY_KEY};

use super::Priority;

/// Priority of the message on screen; `None` means nothing is
/// suppressing new requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub current_priority: Option<Priority>,
}

impl DisplayState {
    pub fn showing(priority: Priority) -> Self {
        Self {
            current_priority: Some(priority),
        }
    }

    /// Read from session storage. An unreadable value counts as absent.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let current_priority = store
            .get(PRIORITY_KEY)
            .and_then(|raw| raw.trim().parse::<Priority>().ok());
        Self { current_priority }
    }

    pub fn save(&self, store: &dyn KeyValueStore) {
        match self.current_priority {
            Some(priority) => store.set(PRIORITY_KEY, &priority.to_string()),
            None => store.remove(PRIORITY_KEY),
        }
    }

    /// Only a strictly higher priority may replace the current message
    pub fn admits(&self, priority: Priority) -> bool {
        match self.current_priority {
            Some(current) => priority > current,
            None => true,
        }
    }
}
