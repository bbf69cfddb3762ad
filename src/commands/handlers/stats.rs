//! Server statistics command handler
//!
//! Handles: stats
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::Result;
use async_trait::async_trait;
use serenity::builder::CreateEmbed;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::channel::{Channel, ChannelType};
use serenity::model::guild::{Guild, PremiumTier};
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::handlers::{respond, respond_embed};

/// Handler for the /stats command
pub struct StatsHandler;

#[async_trait]
impl SlashCommandHandler for StatsHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["stats"]
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let Some(guild_id) = command.guild_id else {
            respond(serenity_ctx, command, "This command only works in a server.").await?;
            return Ok(());
        };

        let Some(guild) = serenity_ctx.cache.guild(guild_id) else {
            respond(
                serenity_ctx,
                command,
                "Server information is not cached yet; try again in a moment.",
            )
            .await?;
            return Ok(());
        };

        let (text_channels, voice_channels, categories) = channel_counts(&guild);
        let role_count = guild.roles.len().saturating_sub(1); // exclude @everyone

        let created = chrono::DateTime::from_timestamp(guild_id.created_at().unix_timestamp(), 0)
            .unwrap_or_else(chrono::Utc::now);
        let age_days = (chrono::Utc::now() - created).num_days();

        let mut embed = CreateEmbed::default();
        embed.title(format!("{} Server Statistics", guild.name));
        embed.description(format!("Server ID: {}", guild.id));
        embed.color(0x2ECC71);
        if let Some(icon) = guild.icon_url() {
            embed.thumbnail(icon);
        }

        embed.field("Owner", format!("<@{}>", guild.owner_id.0), true);
        embed.field(
            "Created",
            format!("{}\n({age_days} days ago)", created.format("%B %d, %Y")),
            true,
        );
        embed.field("Members", guild.member_count.to_string(), true);
        embed.field(
            "Channels",
            format!(
                "📝 Text: {text_channels}\n🔊 Voice: {voice_channels}\n📁 Categories: {categories}"
            ),
            true,
        );
        embed.field("Roles", role_count.to_string(), true);
        embed.field(
            "Boost Status",
            format!(
                "Level: {}\nBoosts: {}",
                boost_level(guild.premium_tier),
                guild.premium_subscription_count
            ),
            true,
        );
        embed.field(
            "Verification",
            format!("{:?}", guild.verification_level),
            true,
        );
        embed.timestamp(serenity::model::Timestamp::now());
        embed.footer(|footer| footer.text(format!("Requested by {}", command.user.name)));

        respond_embed(serenity_ctx, command, embed).await?;
        Ok(())
    }
}

/// Count guild channels by kind: (text, voice, categories).
fn channel_counts(guild: &Guild) -> (usize, usize, usize) {
    let mut text = 0;
    let mut voice = 0;
    let mut categories = 0;
    for channel in guild.channels.values() {
        if let Channel::Guild(guild_channel) = channel {
            match guild_channel.kind {
                ChannelType::Text | ChannelType::News => text += 1,
                ChannelType::Voice | ChannelType::Stage => voice += 1,
                ChannelType::Category => categories += 1,
                _ => {}
            }
        }
    }
    (text, voice, categories)
}

/// Numeric boost level for a premium tier.
fn boost_level(tier: PremiumTier) -> u8 {
    match tier {
        PremiumTier::Tier1 => 1,
        PremiumTier::Tier2 => 2,
        PremiumTier::Tier3 => 3,
        _ => 0,
    }
}
