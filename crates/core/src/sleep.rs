//! Sleep log entity, write-time validation, and rolling quality statistics.

use chrono::{Duration, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{EntityId, Timestamp, UserId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const NANOS_PER_HOUR: f64 = 3_600_000_000_000.0;

/// Lowest accepted sleep quality rating.
pub const MIN_QUALITY: i32 = 1;

/// Highest accepted sleep quality rating.
pub const MAX_QUALITY: i32 = 10;

/// Length of the rolling window used by statistics and goal progress.
pub const LOOKBACK_DAYS: i64 = 7;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A recorded sleep session. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepLog {
    pub id: EntityId,
    pub user_id: UserId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// 1-10 scale.
    pub quality: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interruptions: Vec<String>,
    pub created_at: Timestamp,
}

impl SleepLog {
    /// Time spent asleep.
    pub fn duration(&self) -> TimeDelta {
        self.end_time - self.start_time
    }

    /// Time spent asleep, in fractional hours, at nanosecond precision.
    pub fn duration_hours(&self) -> f64 {
        let duration = self.duration();
        match duration.num_nanoseconds() {
            Some(nanos) => nanos as f64 / NANOS_PER_HOUR,
            None => duration.num_seconds() as f64 / 3_600.0,
        }
    }
}

/// Start of the rolling window that ends at `now`.
pub fn lookback_cutoff(now: Timestamp) -> Timestamp {
    now - Duration::days(LOOKBACK_DAYS)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a session does not end before it starts.
///
/// Zero-length sessions are accepted.
pub fn validate_time_range(start_time: Timestamp, end_time: Timestamp) -> Result<(), CoreError> {
    if end_time < start_time {
        return Err(CoreError::Validation(
            "'end_time' must not be before 'start_time'".into(),
        ));
    }
    Ok(())
}

/// Validate that a quality rating is within `[MIN_QUALITY, MAX_QUALITY]`.
pub fn validate_quality(quality: i32) -> Result<(), CoreError> {
    if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
        return Err(CoreError::Validation(format!(
            "'quality' must be an integer between {MIN_QUALITY} and {MAX_QUALITY}, got {quality}"
        )));
    }
    Ok(())
}

/// Validate that no interruption entry is blank.
pub fn validate_interruptions(interruptions: &[String]) -> Result<(), CoreError> {
    if let Some(idx) = interruptions.iter().position(|i| i.trim().is_empty()) {
        return Err(CoreError::Validation(format!(
            "'interruptions[{idx}]' must not be empty"
        )));
    }
    Ok(())
}

/// Run every write-time check for a new sleep log.
pub fn validate_new_sleep_log(
    start_time: Timestamp,
    end_time: Timestamp,
    quality: i32,
    interruptions: &[String],
) -> Result<(), CoreError> {
    validate_time_range(start_time, end_time)?;
    validate_quality(quality)?;
    validate_interruptions(interruptions)
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Rolling quality summary over the lookback window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepStats {
    /// Mean quality of the included logs, `0.0` when there are none.
    pub average_quality: f64,
    /// Quality of each included log, in input order.
    pub trend: Vec<i32>,
}

/// Compute rolling quality statistics.
///
/// Unlike goal progress this scans every log and keeps the ones that
/// started strictly after the cutoff, so it does not depend on ordering.
pub fn compute_sleep_stats(logs: &[SleepLog], now: Timestamp) -> SleepStats {
    let cutoff = lookback_cutoff(now);

    let trend: Vec<i32> = logs
        .iter()
        .filter(|l| l.start_time > cutoff)
        .map(|l| l.quality)
        .collect();

    let average_quality = if trend.is_empty() {
        0.0
    } else {
        trend.iter().map(|&q| f64::from(q)).sum::<f64>() / trend.len() as f64
    };

    SleepStats {
        average_quality,
        trend,
    }
}
