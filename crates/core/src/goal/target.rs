//! Lenient parsing of goal values into comparable thresholds.
//!
//! Each grammar is scanf-like: a literal prefix followed by a number.
//! Whatever fails to parse falls back to zero, so a mistyped value never
//! rejects a progress request. For `consistency` a zero hour is further
//! coerced to 23 ("no effective constraint" rather than midnight).

use std::sync::LazyLock;

use regex::Regex;

use super::{Goal, GOAL_TYPE_CONSISTENCY, GOAL_TYPE_DURATION, GOAL_TYPE_QUALITY};

/// Leading float token, e.g. `7.5` in `"7.5h"`. Leading whitespace is
/// skipped. The token is taken greedily (`7e` in `"7eh"`) and only then
/// converted, so a malformed token falls back to zero instead of to its
/// longest valid prefix.
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*((?i:nan)|[+-]?(?:(?i:inf)|[\d_]*\.?[\d_]*(?:[eE][+-]?\d*)?))")
        .expect("valid regex")
});

/// `before <int>`; the literal must start the value and be followed by space.
static CONSISTENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^before\s+([+-]?\d+)").expect("valid regex"));

/// `> <int>`; the literal must start the value and be followed by space.
static QUALITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>\s+([+-]?\d+)").expect("valid regex"));

/// Hour used when a consistency goal parses to zero.
pub const DEFAULT_BEDTIME_HOUR: i64 = 23;

/// A goal value resolved against its type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GoalTarget {
    /// Minimum hours asleep per night.
    Duration(f64),
    /// Bedtime must fall before this UTC hour.
    Consistency(i64),
    /// Quality must be strictly greater than this.
    Quality(i64),
    /// Type not recognised; never met.
    Unsupported,
}

impl GoalTarget {
    /// Resolve a stored goal.
    pub fn from_goal(goal: &Goal) -> Self {
        Self::parse(&goal.goal_type, &goal.value)
    }

    /// Resolve a raw `(type, value)` pair.
    pub fn parse(goal_type: &str, value: &str) -> Self {
        match goal_type {
            GOAL_TYPE_DURATION => Self::Duration(parse_duration_hours(value)),
            GOAL_TYPE_CONSISTENCY => Self::Consistency(parse_bedtime_hour(value)),
            GOAL_TYPE_QUALITY => Self::Quality(parse_quality_threshold(value)),
            _ => Self::Unsupported,
        }
    }
}

/// `"7.5h"` -> `7.5`. A bare number without the `h` suffix is accepted.
///
/// Unparsable tokens and finite tokens that overflow to infinity give `0.0`.
/// The literals `inf` and `nan` are kept as is, so they are never met.
pub fn parse_duration_hours(value: &str) -> f64 {
    let Some(token) = capture(&DURATION_RE, value) else {
        return 0.0;
    };
    match token.parse::<f64>() {
        Ok(hours) if hours.is_infinite() && !is_inf_literal(token) => 0.0,
        Ok(hours) => hours,
        Err(_) => 0.0,
    }
}

fn is_inf_literal(token: &str) -> bool {
    token
        .trim_start_matches(['+', '-'])
        .eq_ignore_ascii_case("inf")
}

/// `"before 22"` -> `22`. Unparsable or zero -> [`DEFAULT_BEDTIME_HOUR`].
pub fn parse_bedtime_hour(value: &str) -> i64 {
    match capture(&CONSISTENCY_RE, value).and_then(|n| n.parse::<i64>().ok()) {
        None | Some(0) => DEFAULT_BEDTIME_HOUR,
        Some(hour) => hour,
    }
}

/// `"> 6"` -> `6`. Unparsable -> `0`.
pub fn parse_quality_threshold(value: &str) -> i64 {
    capture(&QUALITY_RE, value)
        .and_then(|n| n.parse::<i64>().ok())
        .unwrap_or(0)
}

fn capture<'a>(re: &Regex, value: &'a str) -> Option<&'a str> {
    re.captures(value)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
