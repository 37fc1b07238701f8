//! Lookback window selection over newest-first log sequences.

use crate::sleep::SleepLog;
use crate::types::Timestamp;

/// Return the leading run of `logs` that started at or after `cutoff`.
///
/// `logs` must be sorted by `start_time`, newest first. Scanning stops at
/// the first entry older than the cutoff, so on unsorted input any recent
/// entries after it are silently dropped. Both storage backends return
/// logs in this order.
pub fn select_window(logs: &[SleepLog], cutoff: Timestamp) -> &[SleepLog] {
    let end = logs
        .iter()
        .position(|l| l.start_time < cutoff)
        .unwrap_or(logs.len());
    &logs[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn log_started(start: Timestamp) -> SleepLog {
        SleepLog {
            id: Uuid::new_v4(),
            user_id: "u1".into(),
            start_time: start,
            end_time: start + Duration::hours(8),
            quality: 5,
            reason: None,
            interruptions: Vec::new(),
            created_at: start,
        }
    }

    fn cutoff() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 8, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_input_gives_empty_window() {
        assert!(select_window(&[], cutoff()).is_empty());
    }

    #[test]
    fn keeps_maximal_prefix_at_or_after_cutoff() {
        let logs: Vec<_> = [3, 2, 0, -1, -5]
            .iter()
            .map(|&d| log_started(cutoff() + Duration::days(d)))
            .collect();

        let window = select_window(&logs, cutoff());

        assert_eq!(window.len(), 3);
        assert_eq!(window, &logs[..3]);
        assert!(window.iter().all(|l| l.start_time >= cutoff()));
    }

    #[test]
    fn entry_exactly_at_cutoff_is_included() {
        let logs = vec![log_started(cutoff())];
        assert_eq!(select_window(&logs, cutoff()).len(), 1);
    }

    #[test]
    fn entry_just_before_cutoff_ends_window() {
        let logs = vec![
            log_started(cutoff() + Duration::hours(1)),
            log_started(cutoff() - Duration::seconds(1)),
        ];
        assert_eq!(select_window(&logs, cutoff()).len(), 1);
    }

    #[test]
    fn all_recent_keeps_everything() {
        let logs: Vec<_> = (0..4)
            .map(|d| log_started(cutoff() + Duration::days(5 - d)))
            .collect();
        assert_eq!(select_window(&logs, cutoff()).len(), 4);
    }

    #[test]
    fn stops_at_first_old_entry_even_if_later_ones_are_recent() {
        let logs = vec![
            log_started(cutoff() + Duration::days(2)),
            log_started(cutoff() - Duration::days(3)),
            log_started(cutoff() + Duration::days(1)),
        ];
        assert_eq!(select_window(&logs, cutoff()).len(), 1);
    }
}
