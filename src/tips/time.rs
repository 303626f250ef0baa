//! @acp:module "Time Rules"
//! @acp:summary "Parse H and H1-H2 hour specs and match them against the current hour"
//! @acp:domain widget
//! @acp:layer logic

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::pool::MessagePool;
use super::table::{parse_number, raw_rules};

/// Hours of the day a time rule covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourSpan {
    Hour(u32),
    /// `[start, end)`; `end` may be 24
    Range { start: u32, end: u32 },
}

impl HourSpan {
    pub fn start(&self) -> u32 {
        match self {
            HourSpan::Hour(hour) => *hour,
            HourSpan::Range { start, .. } => *start,
        }
    }

    pub fn contains(&self, hour: u32) -> bool {
        match *self {
            HourSpan::Hour(h) => h == hour,
            HourSpan::Range { start, end } => start <= hour && hour < end,
        }
    }
}

impl std::fmt::Display for HourSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HourSpan::Hour(hour) => write!(f, "{}", hour),
            HourSpan::Range { start, end } => write!(f, "{}-{}", start, end),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRule {
    pub span: HourSpan,
    pub text: MessagePool,
}

/// Parse `"H"` or `"H1-H2"`. Bounds are sorted; equal bounds collapse to
/// a single hour.
pub fn parse_hour_spec(spec: &str) -> Option<HourSpan> {
    let mut hours: Vec<u32> = spec
        .split('-')
        .map(parse_number)
        .collect::<Option<Vec<_>>>()?;
    hours.sort_unstable();

    match hours.as_slice() {
        [hour] if *hour <= 23 => Some(HourSpan::Hour(*hour)),
        [start, end] if start == end && *start <= 23 => Some(HourSpan::Hour(*start)),
        [start, end] if *start <= 23 && *end <= 24 => Some(HourSpan::Range {
            start: *start,
            end: *end,
        }),
        _ => None,
    }
}

/// Normalize a time table (array or map form), dropping malformed rules
/// and sorting by start hour.
pub fn normalize_times(table: &Value) -> Vec<TimeRule> {
    let mut rules: Vec<TimeRule> = raw_rules(table, "hour")
        .into_iter()
        .filter_map(|raw| match parse_hour_spec(&raw.spec) {
            Some(span) => Some(TimeRule {
                span,
                text: raw.text,
            }),
            None => {
                tracing::debug!("Dropping malformed time rule '{}'", raw.spec);
                None
            }
        })
        .collect();

    rules.sort_by_key(|rule| rule.span.start());
    rules
}

/// First rule (in start order) covering `hour`
pub fn match_hour(rules: &[TimeRule], hour: u32) -> Option<&TimeRule> {
    rules.iter().find(|rule| rule.span.contains(hour))
}

pub(crate) fn deserialize_times<'de, D>(deserializer: D) -> Result<Vec<TimeRule>, D::Error>
where
    D: Deserializer<'de>,
{
    let table = Value::deserialize(deserializer)?;
    Ok(normalize_times(&table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_forms() {
        assert_eq!(parse_hour_spec("7"), Some(HourSpan::Hour(7)));
        assert_eq!(parse_hour_spec("7-7"), Some(HourSpan::Hour(7)));
        assert_eq!(
            parse_hour_spec("11-5"),
            Some(HourSpan::Range { start: 5, end: 11 })
        );
        assert_eq!(
            parse_hour_spec("22-24"),
            Some(HourSpan::Range { start: 22, end: 24 })
        );
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(parse_hour_spec("24"), None);
        assert_eq!(parse_hour_spec("23-25"), None);
        assert_eq!(parse_hour_spec("1-2-3"), None);
        assert_eq!(parse_hour_spec("noon"), None);
        assert_eq!(parse_hour_spec(""), None);
    }

    #[test]
    fn test_upper_bound_is_exclusive() {
        let span = parse_hour_spec("6-9").unwrap();
        assert!(span.contains(6));
        assert!(span.contains(8));
        assert!(!span.contains(9));
        assert!(!span.contains(5));
    }

    #[test]
    fn test_range_to_midnight() {
        let span = parse_hour_spec("19-24").unwrap();
        assert!(span.contains(19));
        assert!(span.contains(23));
        assert!(!span.contains(0));
    }

    #[test]
    fn test_match_in_start_order() {
        let rules = normalize_times(&json!([
            {"hour": "12-14", "text": "lunch"},
            {"hour": "0-24", "text": "any time"},
            {"hour": 13, "text": "one o'clock"},
        ]));
        assert_eq!(
            match_hour(&rules, 13).unwrap().text.texts(),
            ["any time".to_string()]
        );

        let rules = normalize_times(&json!({"12-14": "lunch", "13": "one"}));
        assert_eq!(
            match_hour(&rules, 13).unwrap().text.texts(),
            ["lunch".to_string()]
        );
        assert!(match_hour(&rules, 15).is_none());
    }
}
