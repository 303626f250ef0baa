//! @acp:module "Rule Tables"
//! @acp:summary "Normalize array-or-map rule tables into (spec, text) pairs"
//! @acp:domain widget
//! @acp:layer parse

use serde_json::Value;

use super::pool::MessagePool;

/// One rule before its boundary spec has been parsed
#[derive(Debug, Clone)]
pub(crate) struct RawRule {
    pub spec: String,
    pub text: MessagePool,
}

/// Flatten a rule table into raw rules.
///
/// Accepts either `[{"<spec_field>": "...", "text": ...}, ...]` or
/// `{"<spec>": text, ...}`. Entries with no spec or no usable text are
/// skipped. Numeric specs are accepted and rendered as strings.
pub(crate) fn raw_rules(table: &Value, spec_field: &str) -> Vec<RawRule> {
    match table {
        Value::Array(entries) => entries
            .iter()
            .filter_map(|entry| {
                let spec = spec_string(entry.get(spec_field)?)?;
                let text = pool_of(entry.get("text")?);
                Some(RawRule { spec, text })
            })
            .filter(|rule| !rule.text.is_empty())
            .collect(),
        Value::Object(map) => map
            .iter()
            .map(|(spec, text)| RawRule {
                spec: spec.clone(),
                text: pool_of(text),
            })
            .filter(|rule| !rule.text.is_empty())
            .collect(),
        Value::Null => Vec::new(),
        other => {
            tracing::debug!("Ignoring rule table of unexpected shape: {}", other);
            Vec::new()
        }
    }
}

fn spec_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn pool_of(value: &Value) -> MessagePool {
    serde_json::from_value(value.clone()).unwrap_or_default()
}

/// Parse a non-negative integer the way rule specs write them ("07", " 5")
pub(crate) fn parse_number(part: &str) -> Option<u32> {
    part.trim().parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_form() {
        let table = json!([
            {"date": "1/1", "text": "new year"},
            {"date": "2/14", "text": ["a", "b"]},
        ]);
        let rules = raw_rules(&table, "date");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].spec, "1/1");
        assert_eq!(rules[1].text.len(), 2);
    }

    #[test]
    fn test_map_form() {
        let table = json!({"6-9": "morning"});
        let rules = raw_rules(&table, "hour");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].spec, "6-9");
    }

    #[test]
    fn test_numeric_spec_and_missing_fields() {
        let table = json!([
            {"hour": 7, "text": "seven"},
            {"hour": "8"},
            {"text": "no spec"},
            {"hour": "9", "text": ""},
        ]);
        let rules = raw_rules(&table, "hour");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].spec, "7");
    }

    #[test]
    fn test_unexpected_shape_is_empty() {
        assert!(raw_rules(&json!("12/25"), "date").is_empty());
        assert!(raw_rules(&Value::Null, "date").is_empty());
    }
}
