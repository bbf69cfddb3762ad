//! Command handler registry and dispatch
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;

use super::context::CommandContext;
use super::handler::SlashCommandHandler;

/// Registry mapping command names to handlers.
///
/// A handler registers once and is reachable under every name it declares.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Arc<dyn SlashCommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under all of its declared command names.
    pub fn register(&mut self, handler: Arc<dyn SlashCommandHandler>) {
        for name in handler.command_names() {
            self.handlers.insert(name, Arc::clone(&handler));
        }
    }

    /// Whether a command name has a handler.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of registered command names (not unique handlers).
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Dispatch an interaction to its handler.
    ///
    /// Returns `Ok(false)` when no handler is registered for the command
    /// name; handler errors propagate to the caller's error boundary.
    pub async fn dispatch(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<bool> {
        match self.handlers.get(command.data.name.as_str()) {
            Some(handler) => {
                handler.handle(ctx, serenity_ctx, command).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockHandler {
        names: &'static [&'static str],
    }

    #[async_trait]
    impl SlashCommandHandler for MockHandler {
        fn command_names(&self) -> &'static [&'static str] {
            self.names
        }

        async fn handle(
            &self,
            _ctx: Arc<CommandContext>,
            _serenity_ctx: &Context,
            _command: &ApplicationCommandInteraction,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_register_single_name() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(MockHandler { names: &["roll"] }));

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("roll"));
        assert!(!registry.contains("gif"));
    }

    #[test]
    fn test_register_multiple_names_shares_handler() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(MockHandler {
            names: &["addevent", "events", "delevent"],
        }));

        assert_eq!(registry.len(), 3);
        assert!(registry.contains("addevent"));
        assert!(registry.contains("events"));
        assert!(registry.contains("delevent"));
    }
}
