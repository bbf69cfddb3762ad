//! Timezone conversion command handlers
//!
//! Handles: convert, alltime
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serenity::builder::CreateEmbed;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::handlers::{respond, respond_embed};
use crate::commands::slash::get_string_option;

/// Accepted clock formats, tried in order.
const TIME_FORMATS: &[&str] = &[
    "%H:%M",    // 14:30
    "%I:%M %p", // 2:30 PM
    "%I:%M%p",  // 2:30PM
    "%H%M",     // 1430
];

/// Zones listed by /alltime.
const MAJOR_TIMEZONES: &[&str] = &[
    "US/Pacific",
    "US/Mountain",
    "US/Central",
    "US/Eastern",
    "Europe/Athens",
    "Europe/London",
    "Europe/Paris",
    "Europe/Berlin",
    "Asia/Dubai",
    "Asia/Kolkata",
    "Asia/Singapore",
    "Asia/Tokyo",
    "Australia/Sydney",
    "Pacific/Auckland",
];

const INVALID_ZONE_MESSAGE: &str =
    "Invalid timezone. Use IANA timezone names like 'US/Eastern' or 'Europe/London'.";
const INVALID_TIME_MESSAGE: &str =
    "Invalid time format. Please use formats like '14:30' or '2:30 PM'.";

/// Handler for timezone conversion commands
pub struct TimezoneHandler;

#[async_trait]
impl SlashCommandHandler for TimezoneHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["convert", "alltime"]
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "convert" => self.handle_convert(serenity_ctx, command).await,
            "alltime" => self.handle_alltime(serenity_ctx, command).await,
            _ => Ok(()),
        }
    }
}

impl TimezoneHandler {
    /// Handle /convert - convert a clock time between two zones
    async fn handle_convert(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let time_str = get_string_option(&command.data.options, "time").unwrap_or_default();
        let from_str = get_string_option(&command.data.options, "from").unwrap_or_default();
        let to_str = get_string_option(&command.data.options, "to").unwrap_or_default();

        let (source_tz, target_tz) = match (parse_zone(&from_str), parse_zone(&to_str)) {
            (Some(source), Some(target)) => (source, target),
            _ => {
                respond(serenity_ctx, command, INVALID_ZONE_MESSAGE).await?;
                return Ok(());
            }
        };

        let time = match parse_time_of_day(&time_str) {
            Some(time) => time,
            None => {
                respond(serenity_ctx, command, INVALID_TIME_MESSAGE).await?;
                return Ok(());
            }
        };

        // The given clock time is read on today's date in the source zone
        let today = Utc::now().with_timezone(&source_tz).date_naive();
        let Some(source_time) = localize(source_tz, today, time) else {
            respond(serenity_ctx, command, INVALID_TIME_MESSAGE).await?;
            return Ok(());
        };
        let target_time = source_time.with_timezone(&target_tz);

        let mut embed = CreateEmbed::default();
        embed.title("Time Conversion");
        embed.color(0x3498DB);
        embed.field(
            "From",
            format!("{} {from_str}", source_time.format("%I:%M %p")),
            true,
        );
        embed.field(
            "To",
            format!("{} {to_str}", target_time.format("%I:%M %p")),
            true,
        );

        respond_embed(serenity_ctx, command, embed).await?;
        Ok(())
    }

    /// Handle /alltime - show a clock time across the major timezones
    async fn handle_alltime(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let time_str = get_string_option(&command.data.options, "time").unwrap_or_default();
        let from_str = get_string_option(&command.data.options, "from").unwrap_or_default();

        let Some(source_tz) = parse_zone(&from_str) else {
            respond(serenity_ctx, command, INVALID_ZONE_MESSAGE).await?;
            return Ok(());
        };

        let time = match parse_time_of_day(&time_str) {
            Some(time) => time,
            None => {
                respond(serenity_ctx, command, INVALID_TIME_MESSAGE).await?;
                return Ok(());
            }
        };

        let today = Utc::now().with_timezone(&source_tz).date_naive();
        let Some(source_time) = localize(source_tz, today, time) else {
            respond(serenity_ctx, command, INVALID_TIME_MESSAGE).await?;
            return Ok(());
        };

        let mut embed = CreateEmbed::default();
        embed.title(format!("Time Conversion from {time_str} {from_str}"));
        embed.description("Time in major timezones:");
        embed.color(0xF1C40F);
        embed.field(
            "Original Time",
            format!("{} {from_str}", source_time.format("%I:%M %p")),
            false,
        );

        for zone_name in MAJOR_TIMEZONES {
            let Some(zone) = parse_zone(zone_name) else {
                continue;
            };
            let converted = source_time.with_timezone(&zone);
            let friendly = zone_name
                .rsplit('/')
                .next()
                .unwrap_or(zone_name)
                .replace('_', " ");
            embed.field(
                friendly,
                format!("{} ({zone_name})", converted.format("%I:%M %p")),
                true,
            );
        }

        respond_embed(serenity_ctx, command, embed).await?;
        Ok(())
    }
}

/// Parse an IANA timezone name.
pub fn parse_zone(name: &str) -> Option<Tz> {
    name.parse().ok()
}

/// Parse a clock time in any of the accepted formats.
pub fn parse_time_of_day(time_str: &str) -> Option<NaiveTime> {
    let trimmed = time_str.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
}

/// Resolve a wall-clock time on a date in a zone.
///
/// During DST transitions an ambiguous time takes its earlier reading and a
/// skipped time takes the later one, so the lookup always resolves.
pub fn localize(zone: Tz, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Tz>> {
    let naive = date.and_time(time);
    zone.from_local_datetime(&naive)
        .earliest()
        .or_else(|| zone.from_local_datetime(&naive).latest())
}
