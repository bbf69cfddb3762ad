//! # Subscription Commands
//!
//! Definitions for addsub, subs, delsub, and renewsub.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_addsub_command(),
        create_subs_command(),
        create_delsub_command(),
        create_renewsub_command(),
    ]
}

fn create_addsub_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("addsub")
        .description("Add a subscription to track")
        .create_option(|option| {
            option
                .name("name")
                .description("Subscription name")
                .kind(CommandOptionType::String)
                .required(true)
                .max_length(100)
        })
        .create_option(|option| {
            option
                .name("amount")
                .description("Monthly cost, e.g. 9.99")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("date")
                .description("Next due date (YYYY-MM-DD)")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("notes")
                .description("Optional notes")
                .kind(CommandOptionType::String)
                .required(false)
                .max_length(500)
        });
    command
}

fn create_subs_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("subs")
        .description("List your tracked subscriptions");
    command
}

fn create_delsub_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("delsub")
        .description("Stop tracking a subscription")
        .create_option(|option| {
            option
                .name("id")
                .description("Subscription ID (shown by /subs)")
                .kind(CommandOptionType::String)
                .required(true)
        });
    command
}

fn create_renewsub_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("renewsub")
        .description("Mark a subscription as paid and advance its due date")
        .create_option(|option| {
            option
                .name("id")
                .description("Subscription ID (shown by /subs)")
                .kind(CommandOptionType::String)
                .required(true)
        });
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_subscription_commands() {
        let commands = create_commands();
        assert_eq!(commands.len(), 4);

        let names: Vec<&str> = commands
            .iter()
            .map(|cmd| cmd.0.get("name").unwrap().as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["addsub", "subs", "delsub", "renewsub"]);
    }
}
