//! # Timezone Commands
//!
//! Definitions for convert and alltime.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_convert_command(), create_alltime_command()]
}

fn create_convert_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("convert")
        .description("Convert a time from one timezone to another")
        .create_option(|option| {
            option
                .name("time")
                .description("Time like 14:30 or 2:30 PM")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("from")
                .description("Source timezone, e.g. US/Eastern")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("to")
                .description("Target timezone, e.g. Europe/London")
                .kind(CommandOptionType::String)
                .required(true)
        });
    command
}

fn create_alltime_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("alltime")
        .description("Show a time across all major timezones")
        .create_option(|option| {
            option
                .name("time")
                .description("Time like 14:30 or 2:30 PM")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("from")
                .description("Source timezone, e.g. US/Eastern")
                .kind(CommandOptionType::String)
                .required(true)
        });
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_timezone_commands() {
        let commands = create_commands();
        assert_eq!(commands.len(), 2);

        let names: Vec<&str> = commands
            .iter()
            .map(|cmd| cmd.0.get("name").unwrap().as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["convert", "alltime"]);
    }
}
