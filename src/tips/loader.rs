//! @acp:module "Tips Loader"
//! @acp:summary "Merge built-in, fetched and configured tips documents"
//! @acp:domain widget
//! @acp:layer io

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use super::types::WaifuTips;

/// Load tips with 3-layer merging:
/// 1. Built-in defaults (waifu-tips.defaults.json)
/// 2. Fetched tips document
/// 3. Configured `waifuTips` override
///
/// Merging is shallow: a top-level key present in a later layer replaces
/// the earlier value wholesale. A merged document that still cannot be
/// read falls back to the defaults.
pub fn load_tips(fetched: Option<&Value>, overrides: Option<&Value>) -> WaifuTips {
    let defaults = builtin_defaults().unwrap_or_else(|e| {
        tracing::warn!("{:#}", e);
        Map::new()
    });
    let mut merged = defaults.clone();

    if let Some(fetched) = fetched {
        merge_shallow(&mut merged, fetched);
    }
    if let Some(overrides) = overrides {
        merge_shallow(&mut merged, overrides);
    }

    match serde_json::from_value(Value::Object(merged)) {
        Ok(tips) => tips,
        Err(e) => {
            tracing::warn!("Ignoring unreadable tips document: {}", e);
            serde_json::from_value(Value::Object(defaults)).unwrap_or_default()
        }
    }
}

/// Load built-in tips defaults
fn builtin_defaults() -> Result<Map<String, Value>> {
    // Include the defaults file at compile time
    let json = include_str!("../../assets/waifu-tips.defaults.json");
    serde_json::from_str(json).context("Failed to parse built-in waifu-tips.defaults.json")
}

/// Copy every top-level key of `layer` over `base`
fn merge_shallow(base: &mut Map<String, Value>, layer: &Value) {
    match layer {
        Value::Object(map) => {
            for (key, value) in map {
                base.insert(key.clone(), value.clone());
            }
        }
        Value::Null => {}
        other => tracing::warn!("Tips layer is not an object, skipping: {}", other),
    }
}
