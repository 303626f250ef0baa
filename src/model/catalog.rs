//! @acp:module "Model Catalog"
//! @acp:summary "Groups of interchangeable figure identifiers with optional captions"
//! @acp:domain widget
//! @acp:layer types

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One rotation unit: a single identifier or a set of alternates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelGroup {
    One(String),
    Alternates(Vec<String>),
}

impl ModelGroup {
    /// Empty identifiers and empty alternate lists are treated as absent
    pub fn is_empty(&self) -> bool {
        match self {
            ModelGroup::One(id) => id.is_empty(),
            ModelGroup::Alternates(ids) => ids.iter().all(String::is_empty),
        }
    }

    /// Pick the concrete identifier, at random among alternates
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        match self {
            ModelGroup::One(id) if !id.is_empty() => Some(id.as_str()),
            ModelGroup::One(_) => None,
            ModelGroup::Alternates(ids) => {
                let usable: Vec<&String> = ids.iter().filter(|id| !id.is_empty()).collect();
                usable.choose(rng).copied().map(String::as_str)
            }
        }
    }
}

/// The remote `model_list.json` document
///
/// Entries that are not a usable group (`null`, numbers, `""`, `[]`) are
/// dropped at load, and each caption moves with its group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RawCatalog")]
pub struct ModelCatalog {
    #[serde(default)]
    pub models: Vec<ModelGroup>,

    /// One caption per group index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Option<String>>>,
}

#[derive(Deserialize)]
struct RawCatalog {
    #[serde(default)]
    models: Value,
    #[serde(default)]
    messages: Option<Value>,
}

impl From<RawCatalog> for ModelCatalog {
    fn from(raw: RawCatalog) -> Self {
        let entries = match raw.models {
            Value::Array(entries) => entries,
            Value::Null => Vec::new(),
            single => vec![single],
        };

        let mut models = Vec::with_capacity(entries.len());
        let mut kept = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<ModelGroup>(entry) {
                Ok(group) if !group.is_empty() => {
                    models.push(group);
                    kept.push(index);
                }
                _ => tracing::debug!("Dropping unusable model entry {}", index),
            }
        }

        let messages = raw.messages.as_ref().and_then(Value::as_array).map(|captions| {
            kept.iter()
                .map(|&index| {
                    captions
                        .get(index)
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .collect()
        });

        Self { models, messages }
    }
}

impl ModelCatalog {
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn group(&self, index: usize) -> Option<&ModelGroup> {
        self.models.get(index)
    }

    pub fn caption(&self, index: usize) -> Option<&str> {
        self.messages
            .as_ref()?
            .get(index)?
            .as_deref()
            .filter(|caption| !caption.is_empty())
    }

    /// Append configured groups after the fetched ones, dropping empty
    /// entries. Appended groups have no caption.
    pub fn with_extra_groups(mut self, extra: &[ModelGroup]) -> Self {
        let extra: Vec<ModelGroup> = extra
            .iter()
            .filter(|group| !group.is_empty())
            .cloned()
            .collect();
        if extra.is_empty() {
            return self;
        }

        if let Some(messages) = self.messages.as_mut() {
            messages.resize(self.models.len(), None);
        }
        self.models.extend(extra);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_catalog() {
        let catalog: ModelCatalog = serde_json::from_value(json!({
            "models": ["Potion-Maker/Pio", ["HyperdimensionNeptunia/neptune_classic", "HyperdimensionNeptunia/nepnep"]],
            "messages": ["Pio here", "Neptune!"]
        }))
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.caption(1), Some("Neptune!"));
        assert_eq!(catalog.caption(2), None);
        assert!(matches!(catalog.group(1), Some(ModelGroup::Alternates(ids)) if ids.len() == 2));
    }

    #[test]
    fn test_missing_models_is_empty() {
        let catalog: ModelCatalog = serde_json::from_value(json!({})).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.caption(0), None);
    }

    #[test]
    fn test_resolve_alternates() {
        let group = ModelGroup::Alternates(vec!["a".into(), "".into(), "b".into()]);
        let mut rng = rand::rng();
        for _ in 0..20 {
            let id = group.resolve(&mut rng).unwrap();
            assert!(id == "a" || id == "b");
        }
        assert_eq!(ModelGroup::One("x".into()).resolve(&mut rng), Some("x"));
        assert_eq!(ModelGroup::Alternates(vec![]).resolve(&mut rng), None);
    }

    #[test]
    fn test_non_group_entries_dropped() {
        let catalog: ModelCatalog = serde_json::from_value(json!({
            "models": ["good", null, false, 3, {"id": "x"}]
        }))
        .unwrap();

        assert_eq!(catalog.models, vec![ModelGroup::One("good".into())]);
        assert!(catalog.messages.is_none());
    }

    #[test]
    fn test_empty_groups_dropped_with_their_captions() {
        let catalog: ModelCatalog = serde_json::from_value(json!({
            "models": [[], "good", "", ["", ""], ["a", "b"]],
            "messages": ["for empty", "caption good", "blank", null, 7]
        }))
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.group(0), Some(&ModelGroup::One("good".into())));
        assert_eq!(catalog.caption(0), Some("caption good"));
        assert_eq!(catalog.caption(1), None);
    }

    #[test]
    fn test_extra_groups_keep_captions_aligned() {
        let catalog: ModelCatalog = serde_json::from_value(json!({
            "models": ["a", "b"],
            "messages": ["caption a"]
        }))
        .unwrap();

        let extra = vec![
            ModelGroup::One("".into()),
            ModelGroup::One("c".into()),
            ModelGroup::Alternates(vec![]),
        ];
        let merged = catalog.with_extra_groups(&extra);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.caption(0), Some("caption a"));
        assert_eq!(merged.caption(1), None);
        assert_eq!(merged.caption(2), None);
        assert_eq!(merged.group(2), Some(&ModelGroup::One("c".into())));
    }
}
