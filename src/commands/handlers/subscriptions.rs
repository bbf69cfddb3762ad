//! Subscription tracker command handlers
//!
//! Handles: addsub, subs, delsub, renewsub
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
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
use crate::features::reminders::next_monthly_due;
use crate::storage::{new_record_id, records::can_modify, Subscription, SUBSCRIPTIONS};

/// Subscriptions shown by /subs (Discord allows 25 fields per embed).
const MAX_LISTED_SUBSCRIPTIONS: usize = 25;

/// Outcome of a gated removal attempt.
#[derive(Debug, PartialEq)]
pub enum RemoveOutcome {
    Removed(Subscription),
    NotFound,
    NotPermitted,
}

/// Outcome of a gated renewal attempt.
#[derive(Debug, PartialEq)]
pub enum RenewOutcome {
    Renewed(Subscription),
    NotFound,
    NotPermitted,
}

/// Handler for subscription tracker commands
pub struct SubscriptionHandler;

#[async_trait]
impl SlashCommandHandler for SubscriptionHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["addsub", "subs", "delsub", "renewsub"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "addsub" => self.handle_add(&ctx, serenity_ctx, command).await,
            "subs" => self.handle_list(&ctx, serenity_ctx, command).await,
            "delsub" => self.handle_delete(&ctx, serenity_ctx, command).await,
            "renewsub" => self.handle_renew(&ctx, serenity_ctx, command).await,
            _ => Ok(()),
        }
    }
}

impl SubscriptionHandler {
    /// Handle /addsub - track a new subscription
    async fn handle_add(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let name = get_string_option(&command.data.options, "name").unwrap_or_default();
        let amount_str = get_string_option(&command.data.options, "amount").unwrap_or_default();
        let date_str = get_string_option(&command.data.options, "date").unwrap_or_default();
        let notes = get_string_option(&command.data.options, "notes").unwrap_or_default();

        let Some(amount) = parse_amount(&amount_str) else {
            respond(
                serenity_ctx,
                command,
                "Please provide a valid non-negative amount (e.g., 9.99).",
            )
            .await?;
            return Ok(());
        };

        let Some(next_due) = parse_due_date(&date_str) else {
            respond(
                serenity_ctx,
                command,
                "Please use the date format YYYY-MM-DD (e.g., 2025-05-15).",
            )
            .await?;
            return Ok(());
        };

        let subscription = Subscription {
            id: new_record_id(),
            name: name.clone(),
            amount,
            next_due,
            notes: notes.clone(),
            creator_id: command.user.id.0,
            creator_name: command.user.name.clone(),
            channel_id: command.channel_id.0,
            reminded: false,
        };

        let stored = subscription.clone();
        ctx.store
            .update(SUBSCRIPTIONS, move |subs: &mut HashMap<String, Subscription>| {
                subs.insert(stored.id.clone(), stored);
            })
            .await?;
        info!(
            "Subscription {} ('{name}') added by {}",
            subscription.id, command.user.id
        );

        let mut embed = CreateEmbed::default();
        embed.title("Subscription Added");
        embed.description(format!(
            "**{name}** subscription has been added to your tracker."
        ));
        embed.color(0x2ECC71);
        embed.field("Amount", format!("${amount:.2}"), true);
        embed.field(
            "Next Payment",
            next_due.format("%B %d, %Y").to_string(),
            true,
        );
        if !notes.is_empty() {
            embed.field("Notes", truncate_for_field(&notes), false);
        }
        embed.field("Subscription ID", &subscription.id, true);
        embed.footer(|footer| footer.text(format!("Added by {}", command.user.name)));

        respond_embed(serenity_ctx, command, embed).await?;
        Ok(())
    }

    /// Handle /subs - list the caller's subscriptions
    async fn handle_list(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let subscriptions: HashMap<String, Subscription> = ctx.store.load(SUBSCRIPTIONS);

        if subscriptions.is_empty() {
            respond(
                serenity_ctx,
                command,
                "No subscriptions are currently being tracked!",
            )
            .await?;
            return Ok(());
        }

        let mine = user_subscriptions(&subscriptions, command.user.id.0);
        if mine.is_empty() {
            respond(
                serenity_ctx,
                command,
                "You don't have any subscriptions being tracked!",
            )
            .await?;
            return Ok(());
        }

        let total: f64 = mine.iter().map(|sub| sub.amount).sum();
        let now = Utc::now();

        let mut embed = CreateEmbed::default();
        embed.title("📊 Your Subscription Tracker");
        embed.description(format!("Total monthly cost: **${total:.2}**"));
        embed.color(0x3498DB);
        for subscription in mine.iter().take(MAX_LISTED_SUBSCRIPTIONS) {
            let mut value = format!(
                "💵 Amount: **${:.2}**\n📅 Due: {} ({})",
                subscription.amount,
                subscription.next_due.format("%B %d, %Y"),
                due_status(subscription.next_due, now)
            );
            if !subscription.notes.is_empty() {
                value.push_str(&format!("\n📝 Notes: {}", subscription.notes));
            }
            embed.field(
                format!("{} (ID: {})", subscription.name, subscription.id),
                truncate_for_field(&value),
                false,
            );
        }
        embed.footer(|footer| footer.text("Use /delsub [id] to remove a subscription"));

        respond_embed(serenity_ctx, command, embed).await?;
        Ok(())
    }

    /// Handle /delsub - stop tracking a subscription
    async fn handle_delete(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let Some(sub_id) = get_string_option(&command.data.options, "id") else {
            respond(serenity_ctx, command, "Please provide a subscription ID to delete.").await?;
            return Ok(());
        };

        let actor_id = command.user.id.0;
        let elevated = has_manage_guild(command);

        let lookup_id = sub_id.clone();
        let outcome = ctx
            .store
            .update(SUBSCRIPTIONS, move |subs: &mut HashMap<String, Subscription>| {
                remove_subscription(subs, &lookup_id, actor_id, elevated)
            })
            .await?;

        match outcome {
            RemoveOutcome::NotFound => {
                respond(
                    serenity_ctx,
                    command,
                    format!("No subscription found with ID: {sub_id}"),
                )
                .await?;
            }
            RemoveOutcome::NotPermitted => {
                respond(
                    serenity_ctx,
                    command,
                    "You can only delete subscriptions you created!",
                )
                .await?;
            }
            RemoveOutcome::Removed(subscription) => {
                info!("Subscription {} deleted by {actor_id}", subscription.id);
                respond(
                    serenity_ctx,
                    command,
                    format!(
                        "Subscription **{}** has been deleted from your tracker!",
                        subscription.name
                    ),
                )
                .await?;
            }
        }
        Ok(())
    }

    /// Handle /renewsub - mark paid and roll the due date one month forward
    async fn handle_renew(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let Some(sub_id) = get_string_option(&command.data.options, "id") else {
            respond(serenity_ctx, command, "Please provide a subscription ID to renew.").await?;
            return Ok(());
        };

        let actor_id = command.user.id.0;
        let elevated = has_manage_guild(command);

        let lookup_id = sub_id.clone();
        let outcome = ctx
            .store
            .update(SUBSCRIPTIONS, move |subs: &mut HashMap<String, Subscription>| {
                renew_subscription(subs, &lookup_id, actor_id, elevated)
            })
            .await?;

        match outcome {
            RenewOutcome::NotFound => {
                respond(
                    serenity_ctx,
                    command,
                    format!("No subscription found with ID: {sub_id}"),
                )
                .await?;
            }
            RenewOutcome::NotPermitted => {
                respond(
                    serenity_ctx,
                    command,
                    "You can only renew subscriptions you created!",
                )
                .await?;
            }
            RenewOutcome::Renewed(subscription) => {
                info!("Subscription {} renewed by {actor_id}", subscription.id);
                let mut embed = CreateEmbed::default();
                embed.title("Subscription Renewed");
                embed.description(format!(
                    "Your **{}** subscription has been marked as paid.",
                    subscription.name
                ));
                embed.color(0x2ECC71);
                embed.field("Amount Paid", format!("${:.2}", subscription.amount), true);
                embed.field(
                    "Next Payment Due",
                    subscription.next_due.format("%B %d, %Y").to_string(),
                    true,
                );
                respond_embed(serenity_ctx, command, embed).await?;
            }
        }
        Ok(())
    }
}

/// Parse a monetary amount, accepting an optional leading `$`.
pub fn parse_amount(amount_str: &str) -> Option<f64> {
    let cleaned = amount_str.trim().trim_start_matches('$');
    let amount: f64 = cleaned.parse().ok()?;
    if amount.is_finite() && amount >= 0.0 {
        Some(amount)
    } else {
        None
    }
}

/// Parse a `YYYY-MM-DD` due date to midnight UTC.
pub fn parse_due_date(date_str: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// The caller's subscriptions, soonest due first.
pub fn user_subscriptions(
    subscriptions: &HashMap<String, Subscription>,
    user_id: u64,
) -> Vec<Subscription> {
    let mut mine: Vec<Subscription> = subscriptions
        .values()
        .filter(|sub| sub.creator_id == user_id)
        .cloned()
        .collect();
    mine.sort_by_key(|sub| sub.next_due);
    mine
}

/// Human-readable due status for /subs.
pub fn due_status(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (due - now).num_days();
    if due < now {
        "❗ **OVERDUE**".to_string()
    } else if days == 0 {
        "⚠️ **DUE TODAY**".to_string()
    } else {
        format!("Due in {days} days")
    }
}

/// Remove a subscription if the actor created it or holds elevated rights.
pub fn remove_subscription(
    subscriptions: &mut HashMap<String, Subscription>,
    sub_id: &str,
    actor_id: u64,
    elevated: bool,
) -> RemoveOutcome {
    let Some(subscription) = subscriptions.get(sub_id) else {
        return RemoveOutcome::NotFound;
    };
    if !can_modify(subscription.creator_id, actor_id, elevated) {
        return RemoveOutcome::NotPermitted;
    }
    match subscriptions.remove(sub_id) {
        Some(subscription) => RemoveOutcome::Removed(subscription),
        None => RemoveOutcome::NotFound,
    }
}

/// Advance a subscription one calendar month and clear its reminded flag.
pub fn renew_subscription(
    subscriptions: &mut HashMap<String, Subscription>,
    sub_id: &str,
    actor_id: u64,
    elevated: bool,
) -> RenewOutcome {
    let Some(subscription) = subscriptions.get_mut(sub_id) else {
        return RenewOutcome::NotFound;
    };
    if !can_modify(subscription.creator_id, actor_id, elevated) {
        return RenewOutcome::NotPermitted;
    }
    subscription.next_due = next_monthly_due(subscription.next_due);
    subscription.reminded = false;
    RenewOutcome::Renewed(subscription.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sub(id: &str, creator_id: u64, next_due: DateTime<Utc>, reminded: bool) -> Subscription {
        Subscription {
            id: id.to_string(),
            name: format!("sub-{id}"),
            amount: 9.99,
            next_due,
            notes: String::new(),
            creator_id,
            creator_name: "alice".to_string(),
            channel_id: 9,
            reminded,
        }
    }

    fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_subscription_handler_commands() {
        let handler = SubscriptionHandler;
        let names = handler.command_names();
        assert!(names.contains(&"addsub"));
        assert!(names.contains(&"subs"));
        assert!(names.contains(&"delsub"));
        assert!(names.contains(&"renewsub"));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("9.99"), Some(9.99));
        assert_eq!(parse_amount("$15.00"), Some(15.0));
        assert_eq!(parse_amount(" $7 "), Some(7.0));
        assert_eq!(parse_amount("0"), Some(0.0));
        assert_eq!(parse_amount("-1.50"), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn test_parse_due_date() {
        assert_eq!(parse_due_date("2025-05-15"), Some(date(2025, 5, 15)));
        assert_eq!(parse_due_date("05/15/2025"), None);
        assert_eq!(parse_due_date("2025-13-01"), None);
    }

    #[test]
    fn test_user_subscriptions_filters_and_sorts() {
        let mut subs = HashMap::new();
        subs.insert("a".to_string(), sub("a", 1, date(2025, 6, 10), false));
        subs.insert("b".to_string(), sub("b", 1, date(2025, 6, 1), false));
        subs.insert("x".to_string(), sub("x", 2, date(2025, 5, 1), false));

        let mine = user_subscriptions(&subs, 1);
        let ids: Vec<_> = mine.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_due_status() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(due_status(now - chrono::Duration::days(1), now), "❗ **OVERDUE**");
        assert_eq!(due_status(now + chrono::Duration::hours(2), now), "⚠️ **DUE TODAY**");
        assert_eq!(due_status(now + chrono::Duration::days(5), now), "Due in 5 days");
    }

    #[test]
    fn test_remove_denied_for_non_creator() {
        let mut subs = HashMap::new();
        subs.insert("a".to_string(), sub("a", 1, date(2025, 6, 1), false));

        let outcome = remove_subscription(&mut subs, "a", 2, false);
        assert_eq!(outcome, RemoveOutcome::NotPermitted);
        // Collection unchanged on a permission error
        assert_eq!(subs.len(), 1);
    }

    #[test]
    fn test_remove_allowed_for_elevated() {
        let mut subs = HashMap::new();
        subs.insert("a".to_string(), sub("a", 1, date(2025, 6, 1), false));

        let outcome = remove_subscription(&mut subs, "a", 2, true);
        assert!(matches!(outcome, RemoveOutcome::Removed(_)));
        assert!(subs.is_empty());
    }

    #[test]
    fn test_renew_advances_month_and_clears_flag() {
        let mut subs = HashMap::new();
        subs.insert("a".to_string(), sub("a", 1, date(2025, 1, 31), true));

        let outcome = renew_subscription(&mut subs, "a", 1, false);
        match outcome {
            RenewOutcome::Renewed(renewed) => {
                assert_eq!(renewed.next_due, date(2025, 2, 28));
                assert!(!renewed.reminded);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!subs["a"].reminded);
    }

    #[test]
    fn test_renew_denied_for_non_creator() {
        let mut subs = HashMap::new();
        subs.insert("a".to_string(), sub("a", 1, date(2025, 3, 15), true));

        let outcome = renew_subscription(&mut subs, "a", 2, false);
        assert_eq!(outcome, RenewOutcome::NotPermitted);
        // No mutation on a permission error
        assert_eq!(subs["a"].next_due, date(2025, 3, 15));
        assert!(subs["a"].reminded);
    }

    #[test]
    fn test_renew_missing_id() {
        let mut subs: HashMap<String, Subscription> = HashMap::new();
        assert_eq!(renew_subscription(&mut subs, "nope", 1, false), RenewOutcome::NotFound);
    }
}
