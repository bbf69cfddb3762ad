//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use crate::features::gifs::TenorClient;
use crate::features::reminders::EventReminders;
use crate::storage::RecordStore;

/// Shared state for all command handlers
///
/// Carries the explicit service handles each handler needs — the record
/// store, the pending one-shot reminder registry, and the optional Tenor
/// client. There are no process-wide singletons; everything a handler
/// touches arrives through this context.
#[derive(Clone)]
pub struct CommandContext {
    pub store: RecordStore,
    pub event_reminders: EventReminders,
    pub tenor: Option<TenorClient>,
    pub start_time: std::time::Instant,
}

impl CommandContext {
    pub fn new(
        store: RecordStore,
        event_reminders: EventReminders,
        tenor: Option<TenorClient>,
    ) -> Self {
        CommandContext {
            store,
            event_reminders,
            tenor,
            start_time: std::time::Instant::now(),
        }
    }
}
