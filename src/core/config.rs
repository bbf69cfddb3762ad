//! Environment-driven bot configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Add TENOR_API_KEY for the /gif command
//! - 1.0.0: Initial creation with token, guild, data dir, log level

use anyhow::{anyhow, Result};

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token (required)
    pub discord_token: String,
    /// Guild ID for development-mode command registration (optional)
    pub discord_guild_id: Option<String>,
    /// Tenor API key for GIF search (optional; /gif is disabled without it)
    pub tenor_api_key: Option<String>,
    /// Directory holding the JSON collection files
    pub data_dir: String,
    /// Default log filter for env_logger
    pub log_level: String,
}

impl Config {
    /// Build a Config from environment variables.
    ///
    /// `DISCORD_TOKEN` is required; everything else has a sensible default
    /// or is optional.
    pub fn from_env() -> Result<Self> {
        let discord_token = std::env::var("DISCORD_TOKEN")
            .map_err(|_| anyhow!("DISCORD_TOKEN environment variable is required"))?;

        let discord_guild_id = std::env::var("DISCORD_GUILD_ID")
            .ok()
            .filter(|s| !s.is_empty());

        let tenor_api_key = std::env::var("TENOR_API_KEY")
            .ok()
            .filter(|s| !s.is_empty());

        let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            discord_token,
            discord_guild_id,
            tenor_api_key,
            data_dir,
            log_level,
        })
    }
}
