//! One-shot event reminders
//!
//! Each calendar event gets at most one pending timer, armed at creation for
//! fifteen minutes before the event starts and tracked here by event id so
//! /delevent can cancel it. Firing re-reads the event from the store; an
//! event deleted in the meantime is a silent no-op, as is cancelling a timer
//! that already fired or never existed.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.0.0: Initial creation, replacing ad hoc job scheduling

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use dashmap::DashMap;
use log::{debug, warn};
use tokio::task::JoinHandle;

use crate::features::notify::{Notifier, ReminderNotice};
use crate::storage::{Event, RecordStore, EVENTS};

/// Minutes before an event's start at which its reminder fires.
pub const EVENT_LEAD_MINUTES: i64 = 15;

/// Registry of pending one-shot reminder tasks, keyed by event id.
///
/// Cheap to clone; clones share the registry.
#[derive(Clone, Default)]
pub struct EventReminders {
    pending: Arc<DashMap<String, JoinHandle<()>>>,
}

impl EventReminders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers currently pending.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Arm a reminder for `event`, firing `EVENT_LEAD_MINUTES` before its
    /// start. Returns false without arming anything when that instant has
    /// already passed. Re-arming an event replaces its previous timer.
    pub fn schedule(
        &self,
        store: RecordStore,
        notifier: Arc<dyn Notifier>,
        event: &Event,
    ) -> bool {
        let fire_at = event.starts_at - Duration::minutes(EVENT_LEAD_MINUTES);
        let now = Utc::now();
        if fire_at <= now {
            debug!(
                "Event {} starts too soon for a reminder (lead {EVENT_LEAD_MINUTES}m)",
                event.id
            );
            return false;
        }
        let wait = match (fire_at - now).to_std() {
            Ok(wait) => wait,
            Err(_) => return false,
        };

        let event_id = event.id.clone();
        let task_id = event_id.clone();
        let pending = Arc::clone(&self.pending);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(wait).await;

            // Re-read by id: the event may have been deleted while we slept
            let events: HashMap<String, Event> = store.load(EVENTS);
            if let Some(event) = events.get(&task_id) {
                let notice = ReminderNotice::EventStarting {
                    name: event.name.clone(),
                    description: event.description.clone(),
                    starts_at: event.starts_at,
                    minutes_until: EVENT_LEAD_MINUTES,
                };
                if let Err(e) = notifier.notify(event.channel_id, None, &notice).await {
                    warn!("Failed to deliver reminder for event {task_id}: {e}");
                }
            }
            pending.remove(&task_id);
        });

        if let Some(previous) = self.pending.insert(event_id, handle) {
            previous.abort();
        }
        true
    }

    /// Cancel the pending reminder for an event. Unknown or already-fired
    /// timers are a silent no-op.
    pub fn cancel(&self, event_id: &str) {
        if let Some((_, handle)) = self.pending.remove(event_id) {
            handle.abort();
            debug!("Cancelled pending reminder for event {event_id}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(u64, ReminderNotice)>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(
            &self,
            channel_id: u64,
            _recipient_id: Option<u64>,
            notice: &ReminderNotice,
        ) -> Result<()> {
            self.sent.lock().unwrap().push((channel_id, notice.clone()));
            Ok(())
        }
    }

    fn temp_store() -> RecordStore {
        let dir = std::env::temp_dir().join(format!("almanac-oneshot-{}", uuid::Uuid::new_v4()));
        RecordStore::new(dir)
    }

    fn event_starting_in(minutes: i64) -> Event {
        Event {
            id: "deadbeef".to_string(),
            name: "Movie night".to_string(),
            description: "Bring snacks".to_string(),
            starts_at: Utc::now() + Duration::minutes(minutes),
            creator_id: 42,
            creator_name: "carol".to_string(),
            channel_id: 99,
        }
    }

    #[tokio::test]
    async fn test_past_window_event_gets_no_reminder() {
        let reminders = EventReminders::new();
        let notifier = Arc::new(RecordingNotifier::default());

        // Starts in 10 minutes: the 15-minute-out reminder mark already passed
        let armed = reminders.schedule(temp_store(), notifier, &event_starting_in(10));
        assert!(!armed);
        assert_eq!(reminders.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_future_event_is_armed() {
        let reminders = EventReminders::new();
        let notifier = Arc::new(RecordingNotifier::default());

        let armed = reminders.schedule(temp_store(), notifier, &event_starting_in(60));
        assert!(armed);
        assert_eq!(reminders.pending_count(), 1);

        reminders.cancel("deadbeef");
        assert_eq!(reminders.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_unknown_is_silent() {
        let reminders = EventReminders::new();
        reminders.cancel("no-such-id");
        assert_eq!(reminders.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deleting_before_fire_suppresses_notification() {
        let store = temp_store();
        let reminders = EventReminders::new();
        let notifier = Arc::new(RecordingNotifier::default());

        let event = event_starting_in(20);
        let mut events = HashMap::new();
        events.insert(event.id.clone(), event.clone());
        store.save(EVENTS, &events).unwrap();

        assert!(reminders.schedule(store.clone(), notifier.clone(), &event));

        // Delete before the 15-minutes-out mark
        reminders.cancel(&event.id);

        tokio::time::sleep(std::time::Duration::from_secs(30 * 60)).await;
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fire_delivers_to_origin_channel() {
        let store = temp_store();
        let reminders = EventReminders::new();
        let notifier = Arc::new(RecordingNotifier::default());

        let event = event_starting_in(20);
        let mut events = HashMap::new();
        events.insert(event.id.clone(), event.clone());
        store.save(EVENTS, &events).unwrap();

        assert!(reminders.schedule(store.clone(), notifier.clone(), &event));

        tokio::time::sleep(std::time::Duration::from_secs(30 * 60)).await;

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, 99);
        match &sent[0].1 {
            ReminderNotice::EventStarting { name, minutes_until, .. } => {
                assert_eq!(name, "Movie night");
                assert_eq!(*minutes_until, EVENT_LEAD_MINUTES);
            }
            other => panic!("unexpected notice: {other:?}"),
        }
        drop(sent);
        assert_eq!(reminders.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fire_after_event_deleted_from_store_is_noop() {
        let store = temp_store();
        let reminders = EventReminders::new();
        let notifier = Arc::new(RecordingNotifier::default());

        // Armed, but the store never holds the event (deleted out-of-band)
        let event = event_starting_in(20);
        assert!(reminders.schedule(store.clone(), notifier.clone(), &event));

        tokio::time::sleep(std::time::Duration::from_secs(30 * 60)).await;
        assert!(notifier.sent.lock().unwrap().is_empty());
        assert_eq!(reminders.pending_count(), 0);
    }
}
