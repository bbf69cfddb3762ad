//! # Core Module
//!
//! Configuration and shared response utilities for the almanac bot.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod config;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use response::{
    truncate_for_embed, truncate_for_field, truncate_for_message, EMBED_LIMIT, FIELD_LIMIT,
    MESSAGE_LIMIT,
};
