//! @acp:module "Configuration"
//! @acp:summary "Widget configuration loading, defaults and normalization"
//! @acp:domain widget
//! @acp:layer config

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::model::ModelGroup;

pub const DEFAULT_CONFIG_FILE: &str = "waifu.config.json";
pub const DEFAULT_ABOUT_URL: &str = "https://github.com/stevenjoezhang/live2d-widget";
pub const DEFAULT_QUOTE_URL: &str = "https://v1.hitokoto.cn";
pub const DEFAULT_TITLE_SEPARATOR: &str = " – ";

/// Remote documents, relative to `cdn_path`
pub const MODEL_LIST_FILE: &str = "model_list.json";
pub const TIPS_FILE: &str = "waifu-tips.json";

fn default_cdn_path() -> String {
    "/".to_string()
}

fn default_true() -> bool {
    true
}

fn default_title_separator() -> String {
    DEFAULT_TITLE_SEPARATOR.to_string()
}

fn default_quote_url() -> String {
    DEFAULT_QUOTE_URL.to_string()
}

/// @acp:summary "Options accepted by the widget entry point"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Base path for model_list.json, waifu-tips.json and models
    #[serde(default = "default_cdn_path")]
    pub cdn_path: String,

    /// Gates every message
    #[serde(default = "default_true")]
    pub enable_tips: bool,

    /// Gates the tool icons
    #[serde(default = "default_true")]
    pub enable_tool: bool,

    /// Target of the "about" tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_url: Option<String>,

    /// Merged over the fetched and built-in tips, top-level keys win
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waifu_tips: Option<Value>,

    /// Extra model groups appended to the fetched catalog
    #[serde(
        default,
        deserialize_with = "deserialize_model_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub model_list: Vec<ModelGroup>,

    /// Page titles are cut at the first occurrence of this separator
    #[serde(default = "default_title_separator")]
    pub title_separator: String,

    /// Quote service returning `{ "hitokoto": "..." }`
    #[serde(default = "default_quote_url")]
    pub quote_url: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            cdn_path: default_cdn_path(),
            enable_tips: true,
            enable_tool: true,
            about_url: None,
            waifu_tips: None,
            model_list: Vec::new(),
            title_separator: default_title_separator(),
            quote_url: default_quote_url(),
        }
    }
}

impl WidgetConfig {
    /// Config with only a cdn path, as when the entry point gets a string
    pub fn from_cdn_path(cdn_path: impl Into<String>) -> Self {
        Self {
            cdn_path: cdn_path.into(),
            ..Default::default()
        }
        .normalized()
    }

    /// @acp:summary "Read config from JSON: an options object or a bare cdn path string"
    pub fn from_value(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(cdn_path) => Ok(Self::from_cdn_path(cdn_path)),
            Value::Null => Ok(Self::default()),
            Value::Object(_) => Ok(serde_json::from_value::<Self>(value)?.normalized()),
            other => Err(crate::WaifuError::Config(format!(
                "expected an object or a cdn path string, got {}",
                other
            ))),
        }
    }

    /// @acp:summary "Load config from a waifu.config.json file"
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_value(serde_json::from_str(&content)?)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @acp:summary "Load from default location or fall back to defaults"
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_CONFIG_FILE).unwrap_or_default()
    }

    /// Ensure the cdn path ends with `/`
    pub fn normalized(mut self) -> Self {
        if !self.cdn_path.ends_with('/') {
            self.cdn_path.push('/');
        }
        self
    }

    /// Location of a document relative to the cdn path
    pub fn resource_url(&self, name: &str) -> String {
        format!("{}{}", self.cdn_path, name)
    }

    pub fn about_url(&self) -> &str {
        self.about_url.as_deref().unwrap_or(DEFAULT_ABOUT_URL)
    }
}

/// Keep usable model groups; `null`, `false`, `""` and other shapes are
/// dropped.
fn deserialize_model_list<'de, D>(deserializer: D) -> Result<Vec<ModelGroup>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        Value::Null => Vec::new(),
        single => vec![single],
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<ModelGroup>(entry).ok())
        .filter(|group| !group.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::from_value(json!({})).unwrap();
        assert_eq!(config.cdn_path, "/");
        assert!(config.enable_tips);
        assert!(config.enable_tool);
        assert_eq!(config.about_url(), DEFAULT_ABOUT_URL);
        assert_eq!(config.title_separator, " – ");
    }

    #[test]
    fn test_string_config_is_cdn_path() {
        let config = WidgetConfig::from_value(json!("https://cdn.example/live2d")).unwrap();
        assert_eq!(config.cdn_path, "https://cdn.example/live2d/");
        assert_eq!(
            config.resource_url(MODEL_LIST_FILE),
            "https://cdn.example/live2d/model_list.json"
        );
    }

    #[test]
    fn test_camel_case_options() {
        let config = WidgetConfig::from_value(json!({
            "cdnPath": "/assets/",
            "enableTips": false,
            "enableTool": false,
            "aboutUrl": "https://example.com/about",
            "waifuTips": {"welcome": "hi"},
            "modelList": ["extra", null, false, "", ["a", "b"]],
        }))
        .unwrap();

        assert_eq!(config.cdn_path, "/assets/");
        assert!(!config.enable_tips);
        assert!(!config.enable_tool);
        assert_eq!(config.about_url(), "https://example.com/about");
        assert_eq!(config.waifu_tips, Some(json!({"welcome": "hi"})));
        assert_eq!(
            config.model_list,
            vec![
                ModelGroup::One("extra".into()),
                ModelGroup::Alternates(vec!["a".into(), "b".into()])
            ]
        );
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(WidgetConfig::from_value(json!(42)).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        let config = WidgetConfig::from_cdn_path("/live2d");
        config.save(&path).unwrap();

        let loaded = WidgetConfig::load(&path).unwrap();
        assert_eq!(loaded.cdn_path, "/live2d/");
        assert!(loaded.model_list.is_empty());
    }
}
