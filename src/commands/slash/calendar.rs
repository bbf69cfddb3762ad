//! # Calendar Commands
//!
//! Definitions for addevent, events, and delevent.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_addevent_command(),
        create_events_command(),
        create_delevent_command(),
    ]
}

fn create_addevent_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("addevent")
        .description("Schedule an event with a reminder 15 minutes before it starts")
        .create_option(|option| {
            option
                .name("name")
                .description("Event name")
                .kind(CommandOptionType::String)
                .required(true)
                .max_length(100)
        })
        .create_option(|option| {
            option
                .name("date")
                .description("Event date (YYYY-MM-DD, UTC)")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("time")
                .description("Event time (HH:MM, UTC)")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("description")
                .description("What the event is about")
                .kind(CommandOptionType::String)
                .required(false)
                .max_length(1000)
        });
    command
}

fn create_events_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("events")
        .description("List all upcoming events");
    command
}

fn create_delevent_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("delevent")
        .description("Delete an event you created")
        .create_option(|option| {
            option
                .name("id")
                .description("Event ID (shown by /events)")
                .kind(CommandOptionType::String)
                .required(true)
        });
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_calendar_commands() {
        let commands = create_commands();
        assert_eq!(commands.len(), 3);

        let names: Vec<&str> = commands
            .iter()
            .map(|cmd| cmd.0.get("name").unwrap().as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["addevent", "events", "delevent"]);
    }
}
