//! Slash command handler trait
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use super::context::CommandContext;

/// Trait for slash command handlers
///
/// One handler owns one feature's command group (dice, calendar, ...) and is
/// dispatched by name through the [`super::CommandRegistry`].
///
/// Handlers report user mistakes (bad input, missing records, no permission)
/// as replies and return `Ok`; an `Err` means something actually broke and is
/// turned into a generic failure reply by the dispatch boundary.
#[async_trait]
pub trait SlashCommandHandler: Send + Sync {
    /// Command name(s) this handler processes
    fn command_names(&self) -> &'static [&'static str];

    /// Handle the slash command
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // The registry stores handlers as trait objects
    fn _assert_object_safe(_: &dyn SlashCommandHandler) {}
}
