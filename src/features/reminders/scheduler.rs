//! Daily subscription reminder scan
//!
//! Once a day the scheduler scans the subscriptions collection for records
//! entering the look-ahead window, persists the reminded flags in one write,
//! and then delivers a notification per newly-due record. The flag is
//! persisted before delivery, so a crash between the two costs a reminder
//! rather than repeating one.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{error, info, warn};

use crate::features::notify::{Notifier, ReminderNotice};
use crate::features::reminders::due::{collect_due, reminder_window};
use crate::storage::{RecordStore, Subscription, SUBSCRIPTIONS};

/// Seconds between scans.
const SCAN_INTERVAL_SECS: u64 = 60 * 60 * 24;

/// Background scanner for due subscriptions.
pub struct SubscriptionScheduler {
    store: RecordStore,
    notifier: Arc<dyn Notifier>,
}

impl SubscriptionScheduler {
    pub fn new(store: RecordStore, notifier: Arc<dyn Notifier>) -> Self {
        SubscriptionScheduler { store, notifier }
    }

    /// Run the daily loop forever. The first scan happens immediately.
    pub async fn run(self) {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(SCAN_INTERVAL_SECS));
        loop {
            interval.tick().await;
            match self.tick(Utc::now()).await {
                Ok(0) => {}
                Ok(count) => info!("Sent {count} subscription reminders"),
                Err(e) => error!("Subscription scan failed: {e}"),
            }
        }
    }

    /// One scan: flag newly-due records, persist, notify. Returns the number
    /// of reminders delivered.
    pub async fn tick(&self, now: DateTime<Utc>) -> Result<usize> {
        let newly_due: Vec<Subscription> = self
            .store
            .update(SUBSCRIPTIONS, |subscriptions| {
                collect_due(subscriptions, now, reminder_window())
            })
            .await?;

        for subscription in &newly_due {
            let days_until = (subscription.next_due - now).num_days();
            let notice = ReminderNotice::SubscriptionDue {
                name: subscription.name.clone(),
                amount: subscription.amount,
                due: subscription.next_due,
                days_until,
            };
            if let Err(e) = self
                .notifier
                .notify(subscription.channel_id, Some(subscription.creator_id), &notice)
                .await
            {
                warn!(
                    "Failed to deliver reminder for subscription {}: {e}",
                    subscription.id
                );
            }
        }

        Ok(newly_due.len())
    }
}
