//! @acp:module "Season Rules"
//! @acp:summary "Parse M/D and M/D-M/D date specs and match them against today"
//! @acp:domain widget
//! @acp:layer logic

use chrono::Datelike;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::pool::MessagePool;
use super::table::{parse_number, raw_rules};

/// Calendar day without a year; ordered by month, then day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    /// Returns None for months outside 1..=12 or days outside 1..=31
    pub fn new(month: u32, day: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (1..=31).contains(&day) {
            Some(Self { month, day })
        } else {
            None
        }
    }

    pub fn of<D: Datelike>(date: &D) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

impl std::fmt::Display for MonthDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.month, self.day)
    }
}

/// When a season rule applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBoundary {
    Day(MonthDay),
    /// Inclusive on both ends; `end < start` wraps through year-end
    Range { start: MonthDay, end: MonthDay },
}

impl DateBoundary {
    pub fn start(&self) -> MonthDay {
        match self {
            DateBoundary::Day(day) => *day,
            DateBoundary::Range { start, .. } => *start,
        }
    }

    pub fn contains(&self, today: MonthDay) -> bool {
        match *self {
            DateBoundary::Day(day) => day == today,
            DateBoundary::Range { start, end } if end < start => start <= today || today <= end,
            DateBoundary::Range { start, end } => start <= today && today <= end,
        }
    }
}

impl std::fmt::Display for DateBoundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateBoundary::Day(day) => write!(f, "{}", day),
            DateBoundary::Range { start, end } => write!(f, "{}-{}", start, end),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRule {
    pub boundary: DateBoundary,
    pub text: MessagePool,
}

/// Parse `"M/D"` or `"M1/D1-M2/D2"`.
///
/// The pattern is split on `-`, then on `/`; anything other than 2 or 4
/// valid numbers is rejected.
pub fn parse_date_spec(spec: &str) -> Option<DateBoundary> {
    let numbers: Vec<u32> = spec
        .split('-')
        .flat_map(|side| side.split('/'))
        .map(parse_number)
        .collect::<Option<Vec<_>>>()?;

    match numbers.as_slice() {
        [month, day] => MonthDay::new(*month, *day).map(DateBoundary::Day),
        [m1, d1, m2, d2] => Some(DateBoundary::Range {
            start: MonthDay::new(*m1, *d1)?,
            end: MonthDay::new(*m2, *d2)?,
        }),
        _ => None,
    }
}

/// Normalize a season table (array or map form), dropping malformed rules
/// and sorting by start day.
pub fn normalize_seasons(table: &Value) -> Vec<DateRule> {
    let mut rules: Vec<DateRule> = raw_rules(table, "date")
        .into_iter()
        .filter_map(|raw| match parse_date_spec(&raw.spec) {
            Some(boundary) => Some(DateRule {
                boundary,
                text: raw.text,
            }),
            None => {
                tracing::debug!("Dropping malformed season rule '{}'", raw.spec);
                None
            }
        })
        .collect();

    rules.sort_by_key(|rule| rule.boundary.start());
    rules
}

/// First rule (in start order) that covers `today`
pub fn match_season(rules: &[DateRule], today: MonthDay) -> Option<&DateRule> {
    rules.iter().find(|rule| rule.boundary.contains(today))
}

pub(crate) fn deserialize_seasons<'de, D>(deserializer: D) -> Result<Vec<DateRule>, D::Error>
where
    D: Deserializer<'de>,
{
    let table = Value::deserialize(deserializer)?;
    Ok(normalize_seasons(&table))
}
