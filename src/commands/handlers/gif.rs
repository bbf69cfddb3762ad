//! GIF search command handler
//!
//! Handles: gif
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0

use anyhow::Result;
use async_trait::async_trait;
use log::warn;
use serenity::builder::CreateEmbed;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::handlers::{respond, respond_embed};
use crate::commands::slash::get_string_option;
use crate::features::gifs::pick_random;

/// Handler for the /gif command
pub struct GifHandler;

#[async_trait]
impl SlashCommandHandler for GifHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["gif"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let Some(tenor) = &ctx.tenor else {
            respond(
                serenity_ctx,
                command,
                "GIF search is not configured on this bot (missing Tenor API key).",
            )
            .await?;
            return Ok(());
        };

        let search_term = match get_string_option(&command.data.options, "search") {
            Some(term) if !term.trim().is_empty() => term,
            _ => {
                respond(serenity_ctx, command, "Please provide a search term for the GIF!")
                    .await?;
                return Ok(());
            }
        };

        let results = match tenor.search(&search_term).await {
            Ok(results) => results,
            Err(e) => {
                warn!("Tenor search for '{search_term}' failed: {e}");
                respond(serenity_ctx, command, format!("Error fetching GIF: {e}")).await?;
                return Ok(());
            }
        };

        let Some(url) = pick_random(&results).and_then(|r| r.gif_url()) else {
            respond(
                serenity_ctx,
                command,
                format!("No GIFs found for '{search_term}'"),
            )
            .await?;
            return Ok(());
        };

        let mut embed = CreateEmbed::default();
        embed.color(0x9B59B6);
        embed.image(url);

        respond_embed(serenity_ctx, command, embed).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gif_handler_commands() {
        let handler = GifHandler;
        assert_eq!(handler.command_names(), &["gif"]);
    }
}
