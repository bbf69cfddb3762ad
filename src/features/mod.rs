//! # Features Layer
//!
//! Feature modules: reminder scheduling, notification delivery, GIF search.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod gifs;
pub mod notify;
pub mod reminders;

pub use gifs::TenorClient;
pub use notify::{DiscordNotifier, Notifier, ReminderNotice};
pub use reminders::{EventReminders, SubscriptionScheduler};
