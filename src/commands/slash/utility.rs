//! # Utility Commands
//!
//! Definitions for ping, help, and uptime.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use serenity::builder::CreateApplicationCommand;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_ping_command(),
        create_help_command(),
        create_uptime_command(),
    ]
}

fn create_ping_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command.name("ping").description("Test bot responsiveness");
    command
}

fn create_help_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command.name("help").description("Show available commands");
    command
}

fn create_uptime_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("uptime")
        .description("Show how long the bot has been running");
    command
}
