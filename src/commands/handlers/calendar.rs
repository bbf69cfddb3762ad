//! Event calendar command handlers
//!
//! Handles: addevent, events, delevent
//!
//! All times are read and displayed in UTC. Each add goes through one
//! serialized load-mutate-save cycle on the events collection; deletes also
//! cancel the event's pending reminder.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use log::info;
use serenity::builder::CreateEmbed;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::collections::HashMap;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::handlers::{has_manage_guild, respond, respond_embed};
use crate::commands::slash::get_string_option;
use crate::core::truncate_for_field;
use crate::features::notify::DiscordNotifier;
use crate::storage::{new_record_id, records::can_modify, Event, EVENTS};

/// Events shown by /events (Discord allows 25 fields per embed).
const MAX_LISTED_EVENTS: usize = 25;

const INVALID_DATETIME_MESSAGE: &str =
    "Invalid date or time format. Please use YYYY-MM-DD for the date and HH:MM for the time.";

/// Outcome of a gated removal attempt.
#[derive(Debug, PartialEq)]
pub enum RemoveOutcome {
    Removed(Event),
    NotFound,
    NotPermitted,
}

/// Handler for calendar commands
pub struct CalendarHandler;

#[async_trait]
impl SlashCommandHandler for CalendarHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["addevent", "events", "delevent"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "addevent" => self.handle_add(&ctx, serenity_ctx, command).await,
            "events" => self.handle_list(&ctx, serenity_ctx, command).await,
            "delevent" => self.handle_delete(&ctx, serenity_ctx, command).await,
            _ => Ok(()),
        }
    }
}

impl CalendarHandler {
    /// Handle /addevent - schedule a new event with a reminder
    async fn handle_add(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let name = get_string_option(&command.data.options, "name").unwrap_or_default();
        let date_str = get_string_option(&command.data.options, "date").unwrap_or_default();
        let time_str = get_string_option(&command.data.options, "time").unwrap_or_default();
        let description = get_string_option(&command.data.options, "description")
            .unwrap_or_else(|| "No description provided".to_string());

        let starts_at = match parse_event_start(&date_str, &time_str) {
            Some(starts_at) => starts_at,
            None => {
                respond(serenity_ctx, command, INVALID_DATETIME_MESSAGE).await?;
                return Ok(());
            }
        };

        if starts_at <= Utc::now() {
            respond(serenity_ctx, command, "Cannot schedule events in the past!").await?;
            return Ok(());
        }

        let event = Event {
            id: new_record_id(),
            name: name.clone(),
            description: description.clone(),
            starts_at,
            creator_id: command.user.id.0,
            creator_name: command.user.name.clone(),
            channel_id: command.channel_id.0,
        };

        let stored = event.clone();
        ctx.store
            .update(EVENTS, move |events: &mut HashMap<String, Event>| {
                events.insert(stored.id.clone(), stored);
            })
            .await?;

        let notifier = Arc::new(DiscordNotifier::new(serenity_ctx.http.clone()));
        let armed = ctx
            .event_reminders
            .schedule(ctx.store.clone(), notifier, &event);
        info!(
            "Event {} ('{name}') created by {}, reminder armed: {armed}",
            event.id, command.user.id
        );

        let mut embed = CreateEmbed::default();
        embed.title("Event Added");
        embed.description(format!("**{name}** has been scheduled!"));
        embed.color(0x2ECC71);
        embed.field(
            "Date & Time",
            starts_at.format("%A, %B %d, %Y at %I:%M %p UTC").to_string(),
            false,
        );
        embed.field("Description", truncate_for_field(&description), false);
        embed.field("Event ID", &event.id, true);
        embed.footer(|footer| footer.text(format!("Created by {}", command.user.name)));

        respond_embed(serenity_ctx, command, embed).await?;
        Ok(())
    }

    /// Handle /events - list upcoming events
    async fn handle_list(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let events: HashMap<String, Event> = ctx.store.load(EVENTS);

        if events.is_empty() {
            respond(serenity_ctx, command, "No events are currently scheduled!").await?;
            return Ok(());
        }

        let upcoming = upcoming_events(&events, Utc::now());
        if upcoming.is_empty() {
            respond(serenity_ctx, command, "No upcoming events!").await?;
            return Ok(());
        }

        let mut embed = CreateEmbed::default();
        embed.title("📅 Upcoming Events");
        embed.color(0x3498DB);
        for event in upcoming.iter().take(MAX_LISTED_EVENTS) {
            embed.field(
                format!("{} (ID: {})", event.name, event.id),
                truncate_for_field(&format!(
                    "**When:** {}\n**Description:** {}\n**Created by:** {}",
                    event.starts_at.format("%a, %b %d at %I:%M %p UTC"),
                    event.description,
                    event.creator_name
                )),
                false,
            );
        }
        embed.footer(|footer| footer.text("Use /delevent [id] to remove an event"));

        respond_embed(serenity_ctx, command, embed).await?;
        Ok(())
    }

    /// Handle /delevent - delete an event and cancel its reminder
    async fn handle_delete(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let Some(event_id) = get_string_option(&command.data.options, "id") else {
            respond(serenity_ctx, command, "Please provide an event ID to delete.").await?;
            return Ok(());
        };

        let actor_id = command.user.id.0;
        let elevated = has_manage_guild(command);

        let lookup_id = event_id.clone();
        let outcome = ctx
            .store
            .update(EVENTS, move |events: &mut HashMap<String, Event>| {
                remove_event(events, &lookup_id, actor_id, elevated)
            })
            .await?;

        match outcome {
            RemoveOutcome::NotFound => {
                respond(
                    serenity_ctx,
                    command,
                    format!("No event found with ID: {event_id}"),
                )
                .await?;
            }
            RemoveOutcome::NotPermitted => {
                respond(
                    serenity_ctx,
                    command,
                    "You can only delete events you created!",
                )
                .await?;
            }
            RemoveOutcome::Removed(event) => {
                // Cancelling an already-fired reminder is a no-op
                ctx.event_reminders.cancel(&event.id);
                info!("Event {} deleted by {actor_id}", event.id);
                respond(
                    serenity_ctx,
                    command,
                    format!("Event **{}** has been deleted!", event.name),
                )
                .await?;
            }
        }
        Ok(())
    }
}

/// Parse the add-event date and time arguments into a UTC instant.
pub fn parse_event_start(date_str: &str, time_str: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time_str.trim(), "%H:%M").ok()?;
    Some(date.and_time(time).and_utc())
}

/// Future events, soonest first.
pub fn upcoming_events(events: &HashMap<String, Event>, now: DateTime<Utc>) -> Vec<Event> {
    let mut upcoming: Vec<Event> = events
        .values()
        .filter(|event| event.starts_at > now)
        .cloned()
        .collect();
    upcoming.sort_by_key(|event| event.starts_at);
    upcoming
}

/// Remove an event if the actor created it or holds elevated rights.
///
/// The collection is untouched on `NotFound` and `NotPermitted`.
pub fn remove_event(
    events: &mut HashMap<String, Event>,
    event_id: &str,
    actor_id: u64,
    elevated: bool,
) -> RemoveOutcome {
    let Some(event) = events.get(event_id) else {
        return RemoveOutcome::NotFound;
    };
    if !can_modify(event.creator_id, actor_id, elevated) {
        return RemoveOutcome::NotPermitted;
    }
    match events.remove(event_id) {
        Some(event) => RemoveOutcome::Removed(event),
        None => RemoveOutcome::NotFound,
    }
}
