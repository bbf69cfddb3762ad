//! Dice roller command handler
//!
//! Handles: roll
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use rand::Rng;
use regex::Regex;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::handlers::respond;
use crate::commands::slash::get_string_option;

/// Most dice allowed in a single roll.
const MAX_DICE: u32 = 100;
/// Most sides allowed per die.
const MAX_SIDES: u32 = 1000;
/// Individual results are listed up to this many dice; beyond it only the
/// sum is shown.
const LIST_ROLLS_UP_TO: usize = 10;

/// A parsed dice-notation expression: `NdS`, optionally `+M` or `-M`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceSpec {
    pub count: u32,
    pub sides: u32,
    pub modifier: i64,
}

/// Handler for the /roll command
pub struct DiceHandler;

#[async_trait]
impl SlashCommandHandler for DiceHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["roll"]
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        // Default to a single d20 when no notation is provided
        let notation = get_string_option(&command.data.options, "dice")
            .unwrap_or_else(|| "1d20".to_string());

        let spec = match parse_notation(&notation) {
            Some(spec) => spec,
            None => {
                respond(
                    serenity_ctx,
                    command,
                    "Invalid dice notation! Please use a format like `2d6+3`.",
                )
                .await?;
                return Ok(());
            }
        };

        if spec.count > MAX_DICE {
            respond(
                serenity_ctx,
                command,
                format!("Too many dice! Please roll {MAX_DICE} or fewer."),
            )
            .await?;
            return Ok(());
        }
        if spec.sides > MAX_SIDES {
            respond(
                serenity_ctx,
                command,
                format!("Dice too large! Please use dice with {MAX_SIDES} or fewer sides."),
            )
            .await?;
            return Ok(());
        }

        let rolls = roll(spec);
        let message = format_roll(&notation, spec, &rolls);
        info!(
            "User {} rolled {notation}: {:?}",
            command.user.id, rolls
        );

        respond(serenity_ctx, command, message).await?;
        Ok(())
    }
}

/// Parse standard dice notation (`NdS`, `NdS+M`, `NdS-M`).
///
/// Whitespace is ignored and the notation is case-insensitive. Zero dice or
/// zero-sided dice are rejected.
pub fn parse_notation(notation: &str) -> Option<DiceSpec> {
    let compact = notation.to_lowercase().replace(' ', "");
    let pattern = Regex::new(r"^(\d+)d(\d+)([+-]\d+)?$").ok()?;
    let captures = pattern.captures(&compact)?;

    let count: u32 = captures.get(1)?.as_str().parse().ok()?;
    let sides: u32 = captures.get(2)?.as_str().parse().ok()?;
    let modifier: i64 = match captures.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    if count == 0 || sides == 0 {
        return None;
    }

    Some(DiceSpec {
        count,
        sides,
        modifier,
    })
}

/// Roll the dice.
fn roll(spec: DiceSpec) -> Vec<u32> {
    let mut rng = rand::rng();
    (0..spec.count)
        .map(|_| rng.random_range(1..=spec.sides))
        .collect()
}

/// Format a roll result the way the players expect to read it.
fn format_roll(notation: &str, spec: DiceSpec, rolls: &[u32]) -> String {
    let dice_sum: i64 = rolls.iter().map(|&r| i64::from(r)).sum();
    let total = dice_sum + spec.modifier;

    if spec.count == 1 && spec.modifier == 0 {
        return format!("🎲 You rolled a **{total}**!");
    }

    let mod_part = match spec.modifier {
        0 => String::new(),
        m if m > 0 => format!(" +{m}"),
        m => format!(" {m}"),
    };

    if rolls.len() <= LIST_ROLLS_UP_TO {
        let listed = rolls
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(" + ");
        format!("🎲 You rolled {notation}: ({listed}){mod_part} = **{total}**")
    } else {
        format!("🎲 You rolled {notation}: {dice_sum}{mod_part} = **{total}**")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dice_handler_commands() {
        let handler = DiceHandler;
        assert_eq!(handler.command_names(), &["roll"]);
    }

    #[test]
    fn test_parse_plain_notation() {
        assert_eq!(
            parse_notation("2d6"),
            Some(DiceSpec { count: 2, sides: 6, modifier: 0 })
        );
        assert_eq!(
            parse_notation("1d20"),
            Some(DiceSpec { count: 1, sides: 20, modifier: 0 })
        );
    }

    #[test]
    fn test_parse_with_modifier() {
        assert_eq!(
            parse_notation("2d6+3"),
            Some(DiceSpec { count: 2, sides: 6, modifier: 3 })
        );
        assert_eq!(
            parse_notation("4d8-2"),
            Some(DiceSpec { count: 4, sides: 8, modifier: -2 })
        );
    }

    #[test]
    fn test_parse_ignores_case_and_spaces() {
        assert_eq!(
            parse_notation("2D6 + 3"),
            Some(DiceSpec { count: 2, sides: 6, modifier: 3 })
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_notation("d6"), None);
        assert_eq!(parse_notation("2d"), None);
        assert_eq!(parse_notation("banana"), None);
        assert_eq!(parse_notation("2d6+").is_none(), true);
        assert_eq!(parse_notation(""), None);
    }

    #[test]
    fn test_parse_rejects_zero_dice_and_sides() {
        assert_eq!(parse_notation("0d6"), None);
        assert_eq!(parse_notation("2d0"), None);
    }

    #[test]
    fn test_rolls_are_in_range() {
        let spec = DiceSpec { count: 50, sides: 6, modifier: 0 };
        let rolls = roll(spec);
        assert_eq!(rolls.len(), 50);
        assert!(rolls.iter().all(|&r| (1..=6).contains(&r)));
    }

    #[test]
    fn test_format_single_die_no_modifier() {
        let spec = DiceSpec { count: 1, sides: 20, modifier: 0 };
        assert_eq!(format_roll("1d20", spec, &[17]), "🎲 You rolled a **17**!");
    }

    #[test]
    fn test_format_lists_small_rolls() {
        let spec = DiceSpec { count: 3, sides: 6, modifier: 2 };
        assert_eq!(
            format_roll("3d6+2", spec, &[1, 4, 6]),
            "🎲 You rolled 3d6+2: (1 + 4 + 6) +2 = **13**"
        );
    }

    #[test]
    fn test_format_negative_modifier() {
        let spec = DiceSpec { count: 2, sides: 6, modifier: -1 };
        assert_eq!(
            format_roll("2d6-1", spec, &[3, 5]),
            "🎲 You rolled 2d6-1: (3 + 5) -1 = **7**"
        );
    }

    #[test]
    fn test_format_sums_large_rolls() {
        let spec = DiceSpec { count: 12, sides: 6, modifier: 0 };
        let rolls = vec![1; 12];
        assert_eq!(
            format_roll("12d6", spec, &rolls),
            "🎲 You rolled 12d6: 12 = **12**"
        );
    }
}
