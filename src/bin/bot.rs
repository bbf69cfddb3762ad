use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use almanac::commands::handlers::create_all_handlers;
use almanac::commands::{
    register_global_commands, register_guild_commands, CommandContext, CommandRegistry,
};
use almanac::core::Config;
use almanac::storage::{Event, RecordStore, EVENTS};
use almanac::{DiscordNotifier, EventReminders, SubscriptionScheduler, TenorClient};

struct Handler {
    registry: CommandRegistry,
    context: Arc<CommandContext>,
    guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        // Register slash commands - guild commands for development (instant),
        // global for production
        if let Some(guild_id) = self.guild_id {
            info!("🔧 Development mode: Registering commands for guild {guild_id}");
            if let Err(e) = register_guild_commands(&ctx, guild_id).await {
                error!("❌ Failed to register guild slash commands: {e}");
            }
        } else {
            info!("🌍 Production mode: Registering commands globally");
            if let Err(e) = register_global_commands(&ctx).await {
                error!("❌ Failed to register global slash commands: {e}");
            }
        }

        // Re-arm one-shot reminders for stored events whose reminder mark is
        // still in the future; anything armed before the restart was lost
        // with the process
        let notifier = Arc::new(DiscordNotifier::new(ctx.http.clone()));
        let events: HashMap<String, Event> = self.context.store.load(EVENTS);
        let mut armed = 0;
        for event in events.values() {
            if self.context.event_reminders.schedule(
                self.context.store.clone(),
                notifier.clone(),
                event,
            ) {
                armed += 1;
            }
        }
        if armed > 0 {
            info!("⏰ Re-armed {armed} event reminder(s)");
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::ApplicationCommand(command) = interaction {
            match self
                .registry
                .dispatch(Arc::clone(&self.context), &ctx, &command)
                .await
            {
                Ok(true) => {}
                Ok(false) => {
                    warn!("No handler registered for command '{}'", command.data.name);
                }
                Err(e) => {
                    error!("Error handling slash command '{}': {e}", command.data.name);

                    let error_message =
                        "❌ Sorry, I encountered an error processing your command. Please try again.";
                    if let Err(why) = command
                        .create_interaction_response(&ctx.http, |response| {
                            response
                                .kind(InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|message| message.content(error_message))
                        })
                        .await
                    {
                        error!("Failed to send error response: {why}");
                    }
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Almanac Discord Bot...");

    let store = RecordStore::new(config.data_dir.clone());
    let event_reminders = EventReminders::new();

    let tenor = config.tenor_api_key.clone().map(TenorClient::new);
    if tenor.is_none() {
        info!("No TENOR_API_KEY set - /gif is disabled");
    }

    let context = Arc::new(CommandContext::new(store.clone(), event_reminders, tenor));

    let mut registry = CommandRegistry::new();
    for handler in create_all_handlers() {
        registry.register(handler);
    }

    // Parse guild ID if provided for development mode
    let guild_id = config
        .discord_guild_id
        .as_ref()
        .and_then(|id| id.parse::<u64>().ok())
        .map(GuildId);

    let handler = Handler {
        registry,
        context,
        guild_id,
    };

    let intents = GatewayIntents::GUILDS;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            error!("This could indicate:");
            error!("  - Invalid bot token format");
            error!("  - Network issues reaching Discord API");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    // Start the daily subscription reminder scan
    let notifier = Arc::new(DiscordNotifier::new(client.cache_and_http.http.clone()));
    let scheduler = SubscriptionScheduler::new(store, notifier);
    tokio::spawn(async move {
        scheduler.run().await;
    });

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        error!("This could be due to:");
        error!("  - Invalid bot token");
        error!("  - Network connectivity issues");
        error!("  - Discord API outage");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
