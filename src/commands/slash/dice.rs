//! # Roll Command
//!
//! Dice rolling in standard notation.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_roll_command()]
}

fn create_roll_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("roll")
        .description("Roll dice using standard notation (default: 1d20)")
        .create_option(|option| {
            option
                .name("dice")
                .description("Dice notation like 2d6+3")
                .kind(CommandOptionType::String)
                .required(false)
                .max_length(20)
        });
    command
}
