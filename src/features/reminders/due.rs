//! Reminder-window detection
//!
//! A subscription is "due soon" when its due date falls inside
//! `[now, now + window]`. Each record is flagged the first time it is seen
//! inside the window; the flag makes repeated scans idempotent until
//! /renewsub advances the due date and clears it.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::storage::Subscription;

/// Look-ahead window for subscription reminders, in days.
pub const REMINDER_WINDOW_DAYS: i64 = 3;

/// The reminder look-ahead window as a duration.
pub fn reminder_window() -> Duration {
    Duration::days(REMINDER_WINDOW_DAYS)
}

/// Whether `due` falls inside `[now, now + window]`, boundaries included.
///
/// Overdue items (due before `now`) are outside the window; they surface in
/// /subs as OVERDUE instead of triggering reminders.
pub fn in_window(due: DateTime<Utc>, now: DateTime<Utc>, window: Duration) -> bool {
    now <= due && due <= now + window
}

/// Scan a collection for newly-due subscriptions.
///
/// Flags every unflagged record inside the window and returns clones of the
/// flagged records for notification. Visits each record at most once per
/// call; a record already flagged is skipped even if still inside the window,
/// so running the scan twice without advancing time yields nothing the second
/// time.
pub fn collect_due(
    subscriptions: &mut HashMap<String, Subscription>,
    now: DateTime<Utc>,
    window: Duration,
) -> Vec<Subscription> {
    let mut newly_due = Vec::new();

    for subscription in subscriptions.values_mut() {
        if !subscription.reminded && in_window(subscription.next_due, now, window) {
            subscription.reminded = true;
            newly_due.push(subscription.clone());
        }
    }

    // Stable notification order regardless of map iteration
    newly_due.sort_by_key(|s| s.next_due);
    newly_due
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sub(id: &str, next_due: DateTime<Utc>, reminded: bool) -> Subscription {
        Subscription {
            id: id.to_string(),
            name: format!("sub-{id}"),
            amount: 9.99,
            next_due,
            notes: String::new(),
            creator_id: 1,
            creator_name: "alice".to_string(),
            channel_id: 2,
            reminded,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_window_boundaries_inclusive() {
        let window = reminder_window();
        // Exactly at the far edge: included
        assert!(in_window(now() + window, now(), window));
        // One second past the far edge: excluded
        assert!(!in_window(now() + window + Duration::seconds(1), now(), window));
        // Exactly now: included
        assert!(in_window(now(), now(), window));
        // Already overdue: excluded
        assert!(!in_window(now() - Duration::seconds(1), now(), window));
    }

    #[test]
    fn test_collect_due_flags_and_returns() {
        let mut subs = HashMap::new();
        subs.insert("in".to_string(), sub("in", now() + Duration::days(1), false));
        subs.insert("out".to_string(), sub("out", now() + Duration::days(10), false));

        let due = collect_due(&mut subs, now(), reminder_window());
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, "in");
        assert!(subs["in"].reminded);
        assert!(!subs["out"].reminded);
    }

    #[test]
    fn test_second_scan_is_idempotent() {
        let mut subs = HashMap::new();
        subs.insert("a".to_string(), sub("a", now() + Duration::days(2), false));

        let first = collect_due(&mut subs, now(), reminder_window());
        assert_eq!(first.len(), 1);

        // No time advance: the flag suppresses a second notification
        let second = collect_due(&mut subs, now(), reminder_window());
        assert!(second.is_empty());
    }

    #[test]
    fn test_already_flagged_record_is_skipped() {
        let mut subs = HashMap::new();
        subs.insert("a".to_string(), sub("a", now() + Duration::days(1), true));

        let due = collect_due(&mut subs, now(), reminder_window());
        assert!(due.is_empty());
    }

    #[test]
    fn test_overdue_record_is_not_notified() {
        let mut subs = HashMap::new();
        subs.insert("late".to_string(), sub("late", now() - Duration::days(1), false));

        let due = collect_due(&mut subs, now(), reminder_window());
        assert!(due.is_empty());
        assert!(!subs["late"].reminded);
    }

    #[test]
    fn test_notification_order_is_by_due_date() {
        let mut subs = HashMap::new();
        subs.insert("b".to_string(), sub("b", now() + Duration::days(2), false));
        subs.insert("a".to_string(), sub("a", now() + Duration::days(1), false));
        subs.insert("c".to_string(), sub("c", now() + Duration::hours(1), false));

        let due = collect_due(&mut subs, now(), reminder_window());
        let ids: Vec<_> = due.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
