//! @acp:module "Model Rotation"
//! @acp:summary "Persisted rotation index over catalog groups"
//! @acp:domain widget
//! @acp:layer logic

use std::sync::Arc;

use rand::Rng;

use super::catalog::ModelCatalog;
use crate::storage::{KeyValueStore, MODEL_INDEX_KEY};

/// Resolved figure for one rotation index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelection {
    pub index: usize,
    pub identifier: String,
    pub caption: Option<String>,
}

/// Chooses the figure to show and remembers the choice across page loads
#[derive(Clone)]
pub struct ModelRotation {
    catalog: Arc<ModelCatalog>,
    store: Arc<dyn KeyValueStore>,
}

impl ModelRotation {
    pub fn new(catalog: Arc<ModelCatalog>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { catalog, store }
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Stored index; missing or unreadable values read as 0
    pub fn persisted_index(&self) -> usize {
        self.store
            .get(MODEL_INDEX_KEY)
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(0)
    }

    /// Figure for the stored index
    pub fn load_current(&self) -> Option<ModelSelection> {
        self.load_current_with(&mut rand::rng())
    }

    /// Move to the next group and return its figure
    pub fn advance(&self) -> Option<ModelSelection> {
        self.advance_with(&mut rand::rng())
    }

    pub fn load_current_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<ModelSelection> {
        self.select(self.persisted_index(), rng)
    }

    pub fn advance_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<ModelSelection> {
        if self.catalog.is_empty() {
            return None;
        }
        let next = (self.persisted_index() % self.catalog.len() + 1) % self.catalog.len();
        self.select(next, rng)
    }

    /// Wrap `index`, resolve the first usable group from there and persist
    /// where it landed
    fn select<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Option<ModelSelection> {
        let len = self.catalog.len();
        if len == 0 {
            return None;
        }

        let start = index % len;
        for offset in 0..len {
            let index = (start + offset) % len;
            let Some(identifier) = self
                .catalog
                .group(index)
                .and_then(|group| group.resolve(&mut *rng))
            else {
                tracing::debug!("Model group {} has no usable identifier", index);
                continue;
            };
            let identifier = identifier.to_string();
            self.store.set(MODEL_INDEX_KEY, &index.to_string());

            return Some(ModelSelection {
                index,
                identifier,
                caption: self.catalog.caption(index).map(str::to_string),
            });
        }
        None
    }
}
