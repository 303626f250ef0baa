//! @acp:module "Message Pool"
//! @acp:summary "Candidate text pools and {key} template substitution"
//! @acp:domain widget
//! @acp:layer types

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Raw pool shape as found in tips documents
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawPool {
    One(String),
    Many(Vec<String>),
    Other(serde::de::IgnoredAny),
}

/// Ordered set of candidate texts; one is picked at display time.
///
/// Loads from either a single string or an array of strings. Empty strings
/// are dropped, and anything else loads as an empty pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPool", into = "Vec<String>")]
pub struct MessagePool(Vec<String>);

impl From<RawPool> for MessagePool {
    fn from(raw: RawPool) -> Self {
        match raw {
            RawPool::One(text) => MessagePool::from(text),
            RawPool::Many(texts) => MessagePool::from(texts),
            RawPool::Other(_) => MessagePool::default(),
        }
    }
}

impl From<String> for MessagePool {
    fn from(text: String) -> Self {
        MessagePool::from(vec![text])
    }
}

impl From<&str> for MessagePool {
    fn from(text: &str) -> Self {
        MessagePool::from(text.to_string())
    }
}

impl From<Vec<String>> for MessagePool {
    fn from(texts: Vec<String>) -> Self {
        MessagePool(texts.into_iter().filter(|t| !t.is_empty()).collect())
    }
}

impl From<MessagePool> for Vec<String> {
    fn from(pool: MessagePool) -> Self {
        pool.0
    }
}

impl MessagePool {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn texts(&self) -> &[String] {
        &self.0
    }

    /// Pick one text, uniformly at random when there are several
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        match self.0.as_slice() {
            [] => None,
            [only] => Some(only.as_str()),
            many => many.choose(rng).map(String::as_str),
        }
    }
}

/// Values substituted into `{key}` placeholders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateArgs(Vec<(String, String)>);

impl TemplateArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Replace every `{key}` token with its value. Unknown placeholders are
/// left as written.
pub fn render_template(text: &str, args: &TemplateArgs) -> String {
    let mut rendered = text.to_string();
    for (key, value) in &args.0 {
        rendered = rendered.replace(&format!("{{{}}}", key), value);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_from_single_string() {
        let pool: MessagePool = serde_json::from_str(r#""hello""#).unwrap();
        assert_eq!(pool.texts(), ["hello".to_string()]);
    }

    #[test]
    fn test_pool_drops_empty_strings() {
        let pool: MessagePool = serde_json::from_str(r#"["", "a", ""]"#).unwrap();
        assert_eq!(pool.len(), 1);

        let empty: MessagePool = serde_json::from_str(r#""""#).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_pool_tolerates_wrong_shape() {
        let pool: MessagePool = serde_json::from_str(r#"{"nested": true}"#).unwrap();
        assert!(pool.is_empty());
        let pool: MessagePool = serde_json::from_str("null").unwrap();
        assert!(pool.is_empty());
    }

    #[test]
    fn test_pick_stays_in_pool() {
        let pool = MessagePool::from(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        let mut rng = rand::rng();
        for _ in 0..50 {
            let text = pool.pick(&mut rng).unwrap();
            assert!(pool.texts().iter().any(|t| t == text));
        }
        assert_eq!(MessagePool::default().pick(&mut rng), None);
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        let args = TemplateArgs::new().with("title", "Foo");
        assert_eq!(render_template("{title} / {title}", &args), "Foo / Foo");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let args = TemplateArgs::new().with("title", "Foo");
        assert_eq!(
            render_template("from {referrer} to {title}", &args),
            "from {referrer} to Foo"
        );
    }
}
