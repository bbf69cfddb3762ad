//! Utility command handlers
//!
//! Handles: ping, help, uptime
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::handlers::respond;

/// Handler for utility commands: ping, help, uptime
pub struct UtilityHandler;

#[async_trait]
impl SlashCommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["ping", "help", "uptime"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "ping" => self.handle_ping(serenity_ctx, command).await,
            "help" => self.handle_help(serenity_ctx, command).await,
            "uptime" => self.handle_uptime(&ctx, serenity_ctx, command).await,
            _ => Ok(()),
        }
    }
}

impl UtilityHandler {
    /// Handle /ping command
    async fn handle_ping(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        respond(serenity_ctx, command, "Pong!").await?;
        info!("Ping command completed for user {}", command.user.id);
        Ok(())
    }

    /// Handle /help command
    async fn handle_help(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let help_text = r#"**Available Slash Commands:**
`/roll [dice]` - Roll dice in standard notation (e.g., 2d6+3)
`/convert <time> <from> <to>` - Convert a time between timezones
`/alltime <time> <from>` - Show a time across major timezones
`/gif <search>` - Post a random GIF for a search term
`/stats` - Show server statistics

**Calendar:**
`/addevent <name> <date> <time> [description]` - Schedule an event (reminder 15 minutes before)
`/events` - List upcoming events
`/delevent <id>` - Delete an event you created

**Subscriptions:**
`/addsub <name> <amount> <date> [notes]` - Track a subscription
`/subs` - List your subscriptions
`/delsub <id>` - Stop tracking a subscription
`/renewsub <id>` - Mark paid and roll the due date a month forward

Dates are YYYY-MM-DD and times are HH:MM (UTC)."#;

        respond(serenity_ctx, command, help_text).await?;
        Ok(())
    }

    /// Handle /uptime command
    async fn handle_uptime(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let uptime = format_uptime(ctx.start_time.elapsed().as_secs());
        respond(serenity_ctx, command, format!("⏱️ Up for {uptime}.")).await?;
        Ok(())
    }
}

/// Format an uptime in seconds as a compact human-readable string.
fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86400;
    let hours = (seconds % 86400) / 3600;
    let minutes = (seconds % 3600) / 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utility_handler_commands() {
        let handler = UtilityHandler;
        let names = handler.command_names();
        assert!(names.contains(&"ping"));
        assert!(names.contains(&"help"));
        assert!(names.contains(&"uptime"));
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(42), "42s");
        assert_eq!(format_uptime(60), "1m");
        assert_eq!(format_uptime(3660), "1h 1m");
        assert_eq!(format_uptime(90061), "1d 1h 1m");
    }
}
