//! Record types persisted by the record store
//!
//! Every timestamp field is a `chrono::DateTime<Utc>` and serializes as an
//! ISO-8601 string through chrono's serde support, so collections round-trip
//! exactly through a save/load cycle. Fields added after a collection already
//! exists on disk carry `#[serde(default)]` so older files still load.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Default-if-absent policy for `notes` and `reminded`
//! - 1.0.0: Initial creation with Event and Subscription

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled calendar event.
///
/// Created by /addevent, removed by /delevent; never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub creator_id: u64,
    pub creator_name: String,
    pub channel_id: u64,
}

/// A tracked recurring subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub name: String,
    /// Monthly cost in whole currency units; validated non-negative at the
    /// command boundary.
    pub amount: f64,
    pub next_due: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    pub creator_id: u64,
    pub creator_name: String,
    pub channel_id: u64,
    /// True once a reminder fired for the current billing cycle. Reset by
    /// /renewsub when the due date advances.
    #[serde(default)]
    pub reminded: bool,
}

/// Generate a short record identifier: the first 8 hex characters of a v4 UUID.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}

/// Whether `actor_id` may modify a record created by `creator_id`.
///
/// Creators may always modify their own records; anyone else needs elevated
/// (Manage Server) rights.
pub fn can_modify(creator_id: u64, actor_id: u64, elevated: bool) -> bool {
    actor_id == creator_id || elevated
}
