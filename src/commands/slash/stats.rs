//! # Stats Command
//!
//! Server statistics overview.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use serenity::builder::CreateApplicationCommand;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_stats_command()]
}

fn create_stats_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("stats")
        .description("Display statistics for this server")
        .dm_permission(false);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_stats_command() {
        let commands = create_commands();
        assert_eq!(commands.len(), 1);

        let name = commands[0].0.get("name").unwrap().as_str().unwrap();
        assert_eq!(name, "stats");
    }
}
