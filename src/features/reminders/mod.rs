//! # Reminders Feature
//!
//! Due-date scheduling for subscriptions and calendar events: window scans
//! with exactly-once flagging, cancellable one-shot event reminders, and
//! calendar-aware monthly rollover.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Cancellable one-shot registry keyed by event id
//! - 1.0.0: Initial creation with the daily subscription scan

pub mod due;
pub mod oneshot;
pub mod rollover;
pub mod scheduler;

pub use due::{collect_due, in_window, reminder_window, REMINDER_WINDOW_DAYS};
pub use oneshot::{EventReminders, EVENT_LEAD_MINUTES};
pub use rollover::next_monthly_due;
pub use scheduler::SubscriptionScheduler;
