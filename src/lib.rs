// Core layer - configuration and shared response utilities
pub mod core;

// Storage layer - JSON record collections
pub mod storage;

// Features layer - reminder scheduling, notifications, GIF search
pub mod features;

// Application layer - slash command handling
pub mod commands;

// Re-export core config for convenience
pub use core::Config;

// Re-export storage items
pub use storage::{new_record_id, Event, RecordStore, Subscription};

// Re-export feature items
pub use features::{
    // Reminders
    EventReminders, SubscriptionScheduler,
    // Notifications
    DiscordNotifier, Notifier, ReminderNotice,
    // GIF search
    TenorClient,
};
