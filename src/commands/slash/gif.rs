//! # Gif Command
//!
//! Random GIF search via Tenor.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_gif_command()]
}

fn create_gif_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("gif")
        .description("Post a random GIF for a search term")
        .create_option(|option| {
            option
                .name("search")
                .description("What to search for")
                .kind(CommandOptionType::String)
                .required(true)
                .min_length(1)
                .max_length(100)
        });
    command
}
