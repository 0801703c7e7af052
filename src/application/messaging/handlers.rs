//! Built-in command catalog and handlers

use std::time::Duration;

use chrono::Local;
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

use super::dice::{self, INVALID_DICE};
use super::parser::CommandInvocation;
use crate::application::context::ClientContext;
use crate::application::errors::CommandError;
use crate::domain::entities::{AdminAction, Command, CommandRegistry};

const JOKES: &[&str] = &[
    "Why don't scientists trust atoms? Because they make up everything!",
    "I told my computer I needed a break, and it said no problem, it would go to sleep.",
    "Why do programmers prefer dark mode? Because light attracts bugs.",
    "There are 10 kinds of people: those who understand binary and those who don't.",
    "Why did the scarecrow win an award? Because he was outstanding in his field.",
];

const FACTS: &[&str] = &[
    "Honey never spoils. Archaeologists have found pots of honey in ancient Egyptian tombs that are over 3,000 years old and still perfectly good to eat.",
    "Octopuses have three hearts and blue blood.",
    "A day on Venus is longer than a year on Venus.",
    "Bananas are berries, but strawberries are not.",
    "The Eiffel Tower can be about 15 cm taller in summer because the iron expands in the heat.",
];

const EIGHT_BALL: &[&str] = &[
    "It is certain.", "It is decidedly so.", "Without a doubt.",
    "Yes definitely.", "You may rely on it.", "As I see it, yes.",
    "Most likely.", "Outlook good.", "Yes.", "Signs point to yes.",
    "Reply hazy, try again.", "Ask again later.",
    "Better not tell you now.", "Cannot predict now.",
    "Concentrate and ask again.", "Don't count on it.",
    "My reply is no.", "My sources say no.", "Outlook not so good.",
    "Very doubtful.",
];

const QUOTES: &[&str] = &[
    "Be the change you wish to see in the world. - Mahatma Gandhi",
    "The only thing we have to fear is fear itself. - Franklin D. Roosevelt",
    "Life is what happens when you're busy making other plans. - John Lennon",
    "The way to get started is to quit talking and begin doing. - Walt Disney",
    "The unexamined life is not worth living. - Socrates",
];

/// Everything a handler may touch while it runs
pub struct HandlerContext<'a> {
    pub invocation: &'a CommandInvocation,
    pub registry: &'a CommandRegistry,
    pub client: &'a ClientContext,
    pub rng: &'a mut dyn RngCore,
    pub cooldown: Duration,
}

impl HandlerContext<'_> {
    fn username(&self) -> String {
        self.client.username()
    }

    fn say(&self, content: impl Into<String>) {
        self.client.send_ai_message(content);
    }

    fn pick(&mut self, list: &[&'static str]) -> &'static str {
        list.choose(&mut *self.rng).copied().unwrap_or_default()
    }

    fn target(&self, action: AdminAction) -> Result<String, CommandError> {
        self.invocation
            .first_arg()
            .map(str::to_string)
            .ok_or_else(|| CommandError::MissingArgument(format!("Please specify a user to {}.", action)))
    }
}

/// The user and admin command tables
pub fn builtin_registry() -> CommandRegistry {
    let user = vec![
        Command::new("help", "Shows available commands", help),
        Command::new("joke", "Tells a random joke", joke),
        Command::new("fact", "Shares a random interesting fact", fact),
        Command::new("8ball", "Magic 8-ball answers your question", eight_ball).with_args("[question]"),
        Command::new("roll", "Rolls dice", roll).with_args("[dice]"),
        Command::new("quote", "Shares a random quote", quote),
        Command::new("time", "Shows your current local time", time),
        Command::new("flip", "Flips a coin", flip),
    ];

    let admin = vec![
        Command::new("aikick", "Kick a user from the room (AI performs)", aikick).with_args("[user]"),
        Command::new("aiban", "Ban a user from the room (AI performs)", aiban).with_args("[user]"),
        Command::new("aimute", "Mute a user in the room (AI performs)", aimute).with_args("[user]"),
        Command::new("aiclose", "Close room for violations (AI performs)", aiclose),
        Command::new("aiexit", "Trigger AI to exit room", aiexit),
        Command::new("aisay", "Trigger AI to output message", aisay).with_args("[message]"),
        Command::new("kick", "Kick a user (as admin)", kick).with_args("[user]"),
        Command::new("ban", "Ban a user (as admin)", ban).with_args("[user]"),
        Command::new("mute", "Mute a user (as admin)", mute).with_args("[user]"),
        Command::new("close", "Close room (as admin)", close),
    ];

    CommandRegistry::new(user, admin)
}

/// Render the catalog; admin commands are listed only for privileged users
pub fn help_text(registry: &CommandRegistry, cooldown: Duration, privileged: bool) -> String {
    let minutes = cooldown.as_secs() / 60;
    let mut text = format!("Available commands ({} minute cooldown between user commands):\n", minutes);
    for cmd in registry.user_commands() {
        text.push_str(&cmd.usage_line());
        text.push('\n');
    }

    if privileged {
        text.push_str("\nAdmin commands (no cooldown):\n");
        for cmd in registry.admin_commands() {
            text.push_str(&cmd.usage_line());
            text.push('\n');
        }
    }
    text
}

fn help(ctx: &mut HandlerContext<'_>) -> Result<(), CommandError> {
    let text = help_text(ctx.registry, ctx.cooldown, ctx.client.is_privileged());
    ctx.say(format!("{} requested help with commands:\n\n{}", ctx.username(), text));
    Ok(())
}

fn joke(ctx: &mut HandlerContext<'_>) -> Result<(), CommandError> {
    let joke = ctx.pick(JOKES);
    ctx.say(format!("{} asked for a joke! Here's one: {}", ctx.username(), joke));
    Ok(())
}

fn fact(ctx: &mut HandlerContext<'_>) -> Result<(), CommandError> {
    let fact = ctx.pick(FACTS);
    ctx.say(format!("{} wants to know a fun fact! Did you know? {}", ctx.username(), fact));
    Ok(())
}

fn eight_ball(ctx: &mut HandlerContext<'_>) -> Result<(), CommandError> {
    let answer = ctx.pick(EIGHT_BALL);
    ctx.say(format!("{} shakes the magic 8-ball... {}", ctx.username(), answer));
    Ok(())
}

fn roll(ctx: &mut HandlerContext<'_>) -> Result<(), CommandError> {
    // A malformed expression is answered, not refused: the command still ran.
    let result = match dice::roll(&ctx.invocation.args, &mut *ctx.rng) {
        Some(roll) => roll.to_string(),
        None => INVALID_DICE.to_string(),
    };
    ctx.say(format!("{} rolls the dice... {}", ctx.username(), result));
    Ok(())
}

fn quote(ctx: &mut HandlerContext<'_>) -> Result<(), CommandError> {
    let quote = ctx.pick(QUOTES);
    ctx.say(format!("{} requested a quote: \"{}\"", ctx.username(), quote));
    Ok(())
}

fn time(ctx: &mut HandlerContext<'_>) -> Result<(), CommandError> {
    let local = ctx.client.clock.now().with_timezone(&Local);
    ctx.say(format!("The current local time is {}", local.format("%H:%M:%S")));
    Ok(())
}

fn flip(ctx: &mut HandlerContext<'_>) -> Result<(), CommandError> {
    let side = if ctx.rng.random_bool(0.5) { "heads" } else { "tails" };
    ctx.say(format!("{} flips a coin... it lands on {}!", ctx.username(), side));
    Ok(())
}

/// Announce as the AI, then act on the first argument
fn announced_action(
    ctx: &mut HandlerContext<'_>,
    action: AdminAction,
    announce: fn(&str) -> String,
) -> Result<(), CommandError> {
    let target = ctx.target(action)?;
    ctx.say(announce(&target));
    ctx.client.perform_admin_action(action, Some(&target));
    Ok(())
}

fn silent_action(ctx: &mut HandlerContext<'_>, action: AdminAction) -> Result<(), CommandError> {
    let target = ctx.target(action)?;
    ctx.client.perform_admin_action(action, Some(&target));
    Ok(())
}

fn aikick(ctx: &mut HandlerContext<'_>) -> Result<(), CommandError> {
    announced_action(ctx, AdminAction::Kick, |t| format!("{} has been kicked from the room.", t))
}

fn aiban(ctx: &mut HandlerContext<'_>) -> Result<(), CommandError> {
    announced_action(ctx, AdminAction::Ban, |t| format!("{} has been banned from the room.", t))
}

fn aimute(ctx: &mut HandlerContext<'_>) -> Result<(), CommandError> {
    announced_action(ctx, AdminAction::Mute, |t| format!("{} has been muted in this room.", t))
}

fn aiclose(ctx: &mut HandlerContext<'_>) -> Result<(), CommandError> {
    ctx.say("This room has been closed for violations of AI Chat Network terms of use.");
    ctx.client.perform_admin_action(AdminAction::Close, None);
    Ok(())
}

fn aiexit(ctx: &mut HandlerContext<'_>) -> Result<(), CommandError> {
    ctx.say("I'll be leaving the room now. Goodbye!");
    Ok(())
}

fn aisay(ctx: &mut HandlerContext<'_>) -> Result<(), CommandError> {
    if ctx.invocation.args.is_empty() {
        return Err(CommandError::MissingArgument(
            "Please specify a message for the AI to say.".to_string(),
        ));
    }
    ctx.say(ctx.invocation.args.clone());
    Ok(())
}

fn kick(ctx: &mut HandlerContext<'_>) -> Result<(), CommandError> {
    silent_action(ctx, AdminAction::Kick)
}

fn ban(ctx: &mut HandlerContext<'_>) -> Result<(), CommandError> {
    silent_action(ctx, AdminAction::Ban)
}

fn mute(ctx: &mut HandlerContext<'_>) -> Result<(), CommandError> {
    silent_action(ctx, AdminAction::Mute)
}

fn close(ctx: &mut HandlerContext<'_>) -> Result<(), CommandError> {
    ctx.client.perform_admin_action(AdminAction::Close, None);
    Ok(())
}
