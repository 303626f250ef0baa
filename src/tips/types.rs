//! @acp:module "Tips Types"
//! @acp:summary "Normalized shape of the waifu-tips document"
//! @acp:domain widget
//! @acp:layer types

use serde::Deserialize;

use super::pool::MessagePool;
use super::referrer::ReferrerRules;
use super::season::{deserialize_seasons, DateRule};
use super::time::{deserialize_times, TimeRule};

/// All message tables used by the widget, after merging and normalizing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaifuTips {
    #[serde(default)]
    pub event: EventPools,

    /// Generic welcome template (`{title}`, `{referrer}`)
    #[serde(default)]
    pub welcome: MessagePool,

    /// Shown when the user dismisses the figure
    #[serde(default)]
    pub goodbye: MessagePool,

    #[serde(default, deserialize_with = "deserialize_seasons")]
    pub seasons: Vec<DateRule>,

    #[serde(default, deserialize_with = "deserialize_times")]
    pub times: Vec<TimeRule>,

    #[serde(default)]
    pub referrer: ReferrerRules,
}

/// Pools fired by trigger sources
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPools {
    #[serde(default)]
    pub idle: MessagePool,
    #[serde(default)]
    pub devtool: MessagePool,
    #[serde(default)]
    pub copy: MessagePool,
    #[serde(default)]
    pub visibilitychange: MessagePool,
    #[serde(default)]
    pub screenshot: MessagePool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_document() {
        let tips: WaifuTips = serde_json::from_value(json!({
            "event": {"copy": "copied!"},
            "seasons": {"1/1": "new year", "x": "bad"},
            "times": [{"hour": "6-9", "text": ["morning", "good morning"]}],
        }))
        .unwrap();

        assert_eq!(tips.event.copy.texts(), ["copied!".to_string()]);
        assert!(tips.event.idle.is_empty());
        assert_eq!(tips.seasons.len(), 1);
        assert_eq!(tips.times[0].text.len(), 2);
        assert!(tips.welcome.is_empty());
        assert!(tips.referrer.is_empty());
    }

    #[test]
    fn test_null_tables_are_empty() {
        let tips: WaifuTips =
            serde_json::from_value(json!({"seasons": null, "times": null})).unwrap();
        assert!(tips.seasons.is_empty());
        assert!(tips.times.is_empty());
    }
}
