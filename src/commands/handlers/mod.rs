//! Per-command handler implementations
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.2.0: Add GifHandler
//! - 1.1.0: Add CalendarHandler and SubscriptionHandler
//! - 1.0.0: Initial creation with dice, timezone, stats, utility

pub mod calendar;
pub mod dice;
pub mod gif;
pub mod stats;
pub mod subscriptions;
pub mod timezone;
pub mod utility;

use std::sync::Arc;

use anyhow::Result;
use serenity::builder::CreateEmbed;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::permissions::Permissions;
use serenity::prelude::Context;

use super::handler::SlashCommandHandler;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![
        Arc::new(utility::UtilityHandler),
        Arc::new(dice::DiceHandler),
        Arc::new(timezone::TimezoneHandler),
        Arc::new(gif::GifHandler),
        Arc::new(stats::StatsHandler),
        Arc::new(calendar::CalendarHandler),
        Arc::new(subscriptions::SubscriptionHandler),
    ]
}

/// Reply to an interaction with plain text.
pub(crate) async fn respond(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    content: impl ToString,
) -> Result<()> {
    command
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(content))
        })
        .await?;
    Ok(())
}

/// Reply to an interaction with a single embed.
pub(crate) async fn respond_embed(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    embed: CreateEmbed,
) -> Result<()> {
    command
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.set_embed(embed))
        })
        .await?;
    Ok(())
}

/// Whether the invoking member holds Manage Server in this channel.
///
/// DMs and missing permission data read as not elevated.
pub(crate) fn has_manage_guild(command: &ApplicationCommandInteraction) -> bool {
    command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .map_or(false, |permissions| {
            permissions.contains(Permissions::MANAGE_GUILD)
        })
}
