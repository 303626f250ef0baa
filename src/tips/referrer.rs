//! @acp:module "Referrer Rules"
//! @acp:summary "Pick a message from the referring site's second-level domain"
//! @acp:domain widget
//! @acp:layer logic

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::pool::MessagePool;

const DEFAULT_KEY: &str = "default";

/// Domain label → message, plus the `default` fallback
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferrerRules {
    pub domains: BTreeMap<String, MessagePool>,
    pub default: MessagePool,
}

impl ReferrerRules {
    /// Build from a `{domain: text}` object. Keys are lower-cased; the
    /// `default` key becomes the fallback.
    pub fn from_value(value: &Value) -> Self {
        let mut rules = ReferrerRules::default();
        let Some(map) = value.as_object() else {
            return rules;
        };
        for (key, text) in map {
            let pool: MessagePool = serde_json::from_value(text.clone()).unwrap_or_default();
            let key = key.to_lowercase();
            if key == DEFAULT_KEY {
                rules.default = pool;
            } else {
                rules.domains.insert(key, pool);
            }
        }
        rules
    }

    /// True when no entry carries any text
    pub fn is_empty(&self) -> bool {
        self.default.is_empty() && self.domains.values().all(MessagePool::is_empty)
    }
}

impl<'de> Deserialize<'de> for ReferrerRules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(ReferrerRules::from_value(&value))
    }
}

/// Outcome of referrer matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferrerMatch<'a> {
    /// Navigation inside the same site; the generic welcome applies
    SameHost,
    Domain(&'a MessagePool),
    Default(&'a MessagePool),
}

/// Second dot-separated label of a host, counting from the left
/// (`zh.wikipedia.org` → `wikipedia`, `example.org` → `org`)
pub fn second_level_domain(host: &str) -> Option<&str> {
    host.split('.').nth(1).filter(|label| !label.is_empty())
}

pub fn match_referrer<'a>(
    rules: &'a ReferrerRules,
    referrer_host: &str,
    page_host: &str,
) -> Option<ReferrerMatch<'a>> {
    if referrer_host.eq_ignore_ascii_case(page_host) {
        return Some(ReferrerMatch::SameHost);
    }

    let by_domain = second_level_domain(referrer_host)
        .map(str::to_lowercase)
        .and_then(|label| rules.domains.get(&label))
        .filter(|pool| !pool.is_empty());

    match by_domain {
        Some(pool) => Some(ReferrerMatch::Domain(pool)),
        None if !rules.default.is_empty() => Some(ReferrerMatch::Default(&rules.default)),
        None => None,
    }
}
