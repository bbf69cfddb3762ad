//! Reminder notification capability
//!
//! The scheduler decides *when* a reminder is due; a [`Notifier`] decides how
//! it reaches the channel. Keeping delivery behind a trait lets the timer code
//! run in tests against a recording stub instead of a live gateway.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.0.0: Initial creation with Discord embed delivery

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serenity::builder::CreateEmbed;
use serenity::http::Http;
use serenity::model::id::ChannelId;
use std::sync::Arc;

use crate::core::truncate_for_field;

/// Payload for a due reminder.
#[derive(Debug, Clone, PartialEq)]
pub enum ReminderNotice {
    /// A subscription payment enters the look-ahead window.
    SubscriptionDue {
        name: String,
        amount: f64,
        due: DateTime<Utc>,
        days_until: i64,
    },
    /// A calendar event is about to start.
    EventStarting {
        name: String,
        description: String,
        starts_at: DateTime<Utc>,
        minutes_until: i64,
    },
}

/// Delivery capability for reminders.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `notice` to a channel, optionally mentioning a recipient.
    async fn notify(
        &self,
        channel_id: u64,
        recipient_id: Option<u64>,
        notice: &ReminderNotice,
    ) -> Result<()>;
}

/// Notifier that renders reminders as Discord embeds.
pub struct DiscordNotifier {
    http: Arc<Http>,
}

impl DiscordNotifier {
    pub fn new(http: Arc<Http>) -> Self {
        DiscordNotifier { http }
    }

    /// Build the embed for a notice.
    fn build_embed(notice: &ReminderNotice) -> CreateEmbed {
        let mut embed = CreateEmbed::default();
        match notice {
            ReminderNotice::SubscriptionDue {
                name,
                amount,
                due,
                days_until,
            } => {
                embed.title("💰 Subscription Payment Due Soon");
                embed.description(format!(
                    "Your subscription to **{name}** is due in {days_until} days!"
                ));
                embed.color(0xE67E22);
                embed.field("Amount", format!("${amount:.2}"), true);
                embed.field("Due Date", due.format("%B %d, %Y").to_string(), true);
            }
            ReminderNotice::EventStarting {
                name,
                description,
                starts_at,
                minutes_until,
            } => {
                embed.title("⏰ Event Reminder");
                embed.description(format!(
                    "The event **{name}** is starting in {minutes_until} minutes!"
                ));
                embed.color(0xE67E22);
                embed.field("Time", starts_at.format("%I:%M %p").to_string(), true);
                embed.field("Description", truncate_for_field(description), false);
            }
        }
        embed
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn notify(
        &self,
        channel_id: u64,
        recipient_id: Option<u64>,
        notice: &ReminderNotice,
    ) -> Result<()> {
        let embed = Self::build_embed(notice);
        ChannelId(channel_id)
            .send_message(&self.http, |message| {
                if let Some(user_id) = recipient_id {
                    message.content(format!("<@{user_id}>"));
                }
                message.set_embed(embed)
            })
            .await?;
        Ok(())
    }
}
