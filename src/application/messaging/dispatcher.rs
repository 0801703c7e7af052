//! Command dispatcher - Arbitrates cooldown and permissions, then runs handlers

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::cooldown::CooldownClock;
use super::handlers::{builtin_registry, HandlerContext};
use super::parser::CommandInvocation;
use crate::application::context::ClientContext;
use crate::application::errors::CommandError;
use crate::domain::entities::{CommandRegistry, CommandTable};

/// What happened to a dispatched command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Handler ran; carries the command name
    Executed(String),
    UnknownCommand(String),
    CooldownRejected { command: String, remaining: Duration },
    Unauthorized(String),
    MissingArgument { command: String, notice: String },
    /// Well-formed but not allowed, e.g. moderating yourself
    Refused { command: String, notice: String },
}

impl DispatchOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, DispatchOutcome::Executed(_))
    }

    /// User-visible notice for rejected commands
    pub fn notice(&self) -> Option<String> {
        match self {
            DispatchOutcome::Executed(_) => None,
            DispatchOutcome::UnknownCommand(name) => Some(format!("Unknown command: /{}", name)),
            DispatchOutcome::CooldownRejected { remaining, .. } => Some(format!(
                "Command cooldown: Please wait before using another command ({}s remaining).",
                remaining.as_secs().max(1)
            )),
            DispatchOutcome::Unauthorized(name) => {
                Some(format!("Insufficient permissions for /{}", name))
            }
            DispatchOutcome::MissingArgument { notice, .. } | DispatchOutcome::Refused { notice, .. } => {
                Some(notice.clone())
            }
        }
    }
}

/// Routes parsed commands to their handlers.
///
/// User commands share one cooldown window; admin commands skip it entirely
/// so moderation is never throttled.
pub struct CommandDispatcher {
    registry: CommandRegistry,
    cooldown: CooldownClock,
    rng: Box<dyn RngCore + Send>,
}

impl CommandDispatcher {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            registry: builtin_registry(),
            cooldown: CooldownClock::new(cooldown),
            rng: Box::new(StdRng::from_os_rng()),
        }
    }

    /// Replace the random source, e.g. with a seeded one
    pub fn with_rng<R: RngCore + Send + 'static>(mut self, rng: R) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn cooldown(&self) -> &CooldownClock {
        &self.cooldown
    }

    pub fn dispatch(&mut self, invocation: &CommandInvocation, client: &ClientContext) -> DispatchOutcome {
        let outcome = self.arbitrate(invocation, client);

        match outcome.notice() {
            Some(notice) => {
                tracing::debug!("/{} rejected: {:?}", invocation.name, outcome);
                client.notify(&notice);
            }
            None => tracing::debug!("/{} executed", invocation.name),
        }
        outcome
    }

    fn arbitrate(&mut self, invocation: &CommandInvocation, client: &ClientContext) -> DispatchOutcome {
        let name = invocation.name.clone();

        let Some((table, command)) = self.registry.find(&name) else {
            return DispatchOutcome::UnknownCommand(name);
        };
        let handler = command.handler;

        let now = client.clock.now();
        match table {
            CommandTable::User => {
                if let Err(remaining) = self.cooldown.check(now) {
                    return DispatchOutcome::CooldownRejected { command: name, remaining };
                }
            }
            CommandTable::Admin => {
                if !client.is_privileged() {
                    return DispatchOutcome::Unauthorized(name);
                }
            }
        }

        let mut ctx = HandlerContext {
            invocation,
            registry: &self.registry,
            client,
            rng: self.rng.as_mut(),
            cooldown: self.cooldown.window(),
        };

        match handler(&mut ctx) {
            Ok(()) => {
                if table == CommandTable::User {
                    self.cooldown.mark(now);
                }
                DispatchOutcome::Executed(name)
            }
            Err(CommandError::MissingArgument(notice)) | Err(CommandError::InvalidArgs(notice)) => {
                DispatchOutcome::MissingArgument { command: name, notice }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{harness, Harness};
    use crate::domain::entities::{AdminAction, Outbound};
    use crate::domain::traits::Clock;
    use chrono::TimeDelta;

    fn run(h: &mut Harness, text: &str) -> DispatchOutcome {
        let (name, args) = text.split_once(' ').unwrap_or((text, ""));
        let invocation = CommandInvocation::new(name, args);
        h.dispatcher.dispatch(&invocation, &h.client)
    }

    #[test]
    fn test_unknown_command() {
        let mut h = harness(false);
        let outcome = run(&mut h, "dance");
        assert_eq!(outcome, DispatchOutcome::UnknownCommand("dance".to_string()));
        assert_eq!(h.notifier.notices(), vec!["Unknown command: /dance".to_string()]);
        assert!(h.dispatcher.cooldown().last_user_command_at().is_none());
        assert!(h.channel.sent().is_empty());
    }

    #[test]
    fn test_cooldown_boundary() {
        let mut h = harness(false);
        let t = h.clock.now();

        assert!(run(&mut h, "flip").is_executed());
        assert_eq!(h.dispatcher.cooldown().last_user_command_at(), Some(t));

        h.clock.set(t + TimeDelta::milliseconds(599_999));
        let outcome = run(&mut h, "joke");
        assert!(matches!(outcome, DispatchOutcome::CooldownRejected { .. }));
        assert_eq!(h.dispatcher.cooldown().last_user_command_at(), Some(t));
        assert_eq!(h.channel.sent().len(), 1);

        h.clock.set(t + TimeDelta::milliseconds(600_000));
        assert!(run(&mut h, "joke").is_executed());
        assert_eq!(h.channel.sent().len(), 2);
    }

    #[test]
    fn test_admin_commands_skip_cooldown() {
        let mut h = harness(true);
        let t = h.clock.now();
        assert!(run(&mut h, "flip").is_executed());

        h.clock.advance(TimeDelta::microseconds(500));
        assert!(run(&mut h, "kick alice").is_executed());
        h.clock.advance(TimeDelta::microseconds(500));
        assert!(run(&mut h, "kick alice").is_executed());

        // Admin commands neither check nor advance the clock.
        assert_eq!(h.dispatcher.cooldown().last_user_command_at(), Some(t));
    }

    #[test]
    fn test_unauthorized_admin_command() {
        let mut h = harness(false);
        let outcome = run(&mut h, "kick alice");
        assert_eq!(outcome, DispatchOutcome::Unauthorized("kick".to_string()));
        assert!(h.channel.sent().is_empty());
    }

    #[test]
    fn test_aikick_announces_then_acts() {
        let mut h = harness(true);
        assert!(run(&mut h, "aikick bob").is_executed());

        let sent = h.channel.sent();
        assert_eq!(sent.len(), 2);
        match &sent[0] {
            Outbound::AiMessage(msg) => assert_eq!(msg.content, "bob has been kicked from the room."),
            other => panic!("expected AI message, got {:?}", other),
        }
        match &sent[1] {
            Outbound::AdminAction(req) => {
                assert_eq!(req.action, AdminAction::Kick);
                assert_eq!(req.target_user.as_deref(), Some("bob"));
            }
            other => panic!("expected admin action, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_target_aborts_before_transport() {
        let mut h = harness(true);
        for cmd in ["kick", "aiban", "mute"] {
            let outcome = run(&mut h, cmd);
            assert!(matches!(outcome, DispatchOutcome::MissingArgument { .. }), "{}", cmd);
        }
        assert!(h.channel.sent().is_empty());
        assert_eq!(h.notifier.notices()[0], "Please specify a user to kick.");
    }

    #[test]
    fn test_close_and_aiexit_need_no_target() {
        let mut h = harness(true);
        assert!(run(&mut h, "close").is_executed());
        assert!(run(&mut h, "aiexit").is_executed());
        assert!(run(&mut h, "aiclose").is_executed());

        let sent = h.channel.sent();
        assert_eq!(sent.len(), 4);
        assert!(matches!(&sent[0], Outbound::AdminAction(req) if req.action == AdminAction::Close && req.target_user.is_none()));
        assert!(matches!(&sent[1], Outbound::AiMessage(_)));
        assert!(matches!(&sent[2], Outbound::AiMessage(_)));
        assert!(matches!(&sent[3], Outbound::AdminAction(req) if req.action == AdminAction::Close));
    }

    #[test]
    fn test_aisay_requires_message() {
        let mut h = harness(true);
        assert!(matches!(run(&mut h, "aisay"), DispatchOutcome::MissingArgument { .. }));
        assert!(run(&mut h, "aisay hello room").is_executed());
        assert!(matches!(&h.channel.sent()[0], Outbound::AiMessage(m) if m.content == "hello room"));
    }

    #[test]
    fn test_malformed_dice_still_consumes_cooldown() {
        let mut h = harness(false);
        assert!(run(&mut h, "roll 11d6").is_executed());
        assert!(h.dispatcher.cooldown().last_user_command_at().is_some());
        match &h.channel.sent()[0] {
            Outbound::AiMessage(m) => assert!(m.content.ends_with(crate::application::messaging::dice::INVALID_DICE)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_help_includes_admin_section_only_for_admins() {
        let mut member = harness(false);
        run(&mut member, "help");
        let Outbound::AiMessage(msg) = &member.channel.sent()[0] else { panic!("expected AI message") };
        assert!(msg.content.starts_with("tester requested help with commands:"));
        assert!(!msg.content.contains("Admin commands"));

        let mut admin = harness(true);
        run(&mut admin, "help");
        let Outbound::AiMessage(msg) = &admin.channel.sent()[0] else { panic!("expected AI message") };
        assert!(msg.content.contains("Admin commands (no cooldown):"));
    }
}
