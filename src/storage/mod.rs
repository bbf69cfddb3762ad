//! # Storage Module
//!
//! JSON-file persistence for named record collections.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Typed records with serde; per-collection write serialization
//! - 1.0.0: Initial creation with untyped load/save

pub mod records;
pub mod store;

pub use records::{new_record_id, Event, Subscription};
pub use store::RecordStore;

/// Collection name for calendar events.
pub const EVENTS: &str = "events";
/// Collection name for tracked subscriptions.
pub const SUBSCRIPTIONS: &str = "subscriptions";
