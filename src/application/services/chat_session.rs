//! Chat session - the single entry point for everything the user submits

use std::collections::BTreeSet;

use crate::application::context::ClientContext;
use crate::application::errors::CommandError;
use crate::application::messaging::{CommandDispatcher, DispatchOutcome, Input, MessageParser, WhisperCommand};
use crate::domain::entities::{AdminAction, WhisperMessage};

use super::whisper_session::{WhisperSessionController, WhisperState};
use super::whisper_store::WhisperStore;

/// What `submit` did with the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, nothing happened
    Ignored,
    Whispered(WhisperMessage),
    /// A `/w` command without recipient or message
    WhisperRejected,
    Command(DispatchOutcome),
    /// Ordinary chat text; the host sends it through its normal path
    Chat(String),
}

/// Owns all per-session state: cooldown, whisper mode and history.
///
/// Every method takes `&mut self`, so one submission always finishes before
/// the next one starts.
pub struct ChatSession {
    client: ClientContext,
    parser: MessageParser,
    dispatcher: CommandDispatcher,
    whispers: WhisperSessionController,
    store: WhisperStore,
}

impl ChatSession {
    pub fn new(client: ClientContext, dispatcher: CommandDispatcher, store: WhisperStore) -> Self {
        Self {
            client,
            parser: MessageParser::default(),
            dispatcher,
            whispers: WhisperSessionController::new(),
            store,
        }
    }

    pub fn client(&self) -> &ClientContext {
        &self.client
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    pub fn store(&self) -> &WhisperStore {
        &self.store
    }

    /// Handle one line from the message box.
    ///
    /// `/w` and `/whisper` send a one-off whisper in any state and leave
    /// whisper mode untouched. Apart from those, whisper mode takes every
    /// line, slash commands included; otherwise slash input goes to the
    /// dispatcher.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let input = self.parser.parse(text);
        if let Input::Command(invocation) = &input {
            if invocation.is_whisper() {
                return match WhisperCommand::from_invocation(invocation) {
                    Ok(cmd) => self.whisper(&cmd.recipient, &cmd.message),
                    Err(CommandError::InvalidArgs(notice)) | Err(CommandError::MissingArgument(notice)) => {
                        self.client.notify(&notice);
                        SubmitOutcome::WhisperRejected
                    }
                };
            }
        }

        if let Some(target) = self.whispers.target().map(str::to_string) {
            return self.whisper(&target, text);
        }

        match input {
            Input::Command(invocation) => {
                SubmitOutcome::Command(self.dispatcher.dispatch(&invocation, &self.client))
            }
            Input::Text(text) => SubmitOutcome::Chat(text),
        }
    }

    fn whisper(&mut self, recipient: &str, content: &str) -> SubmitOutcome {
        match self.whispers.send(recipient, content, &self.client, &mut self.store) {
            Some(message) => SubmitOutcome::Whispered(message),
            None => SubmitOutcome::Ignored,
        }
    }

    pub fn enter_whisper_mode(&mut self, target: &str) -> bool {
        let entered = self.whispers.enter(target);
        if !entered {
            self.client.notify("Choose someone to whisper to.");
        }
        entered
    }

    pub fn exit_whisper_mode(&mut self) {
        self.whispers.exit();
    }

    pub fn whisper_state(&self) -> &WhisperState {
        self.whispers.state()
    }

    pub fn whisper_target(&self) -> Option<&str> {
        self.whispers.target()
    }

    /// A whisper arrived from the server
    pub fn receive_whisper(&mut self, message: WhisperMessage) {
        let me = self.client.username();
        let line = if message.sender == me {
            format!("To {} (whisper): {}", message.recipient, message.content)
        } else {
            format!("From {} (whisper): {}", message.sender, message.content)
        };
        let author = if message.sender == me { "You".to_string() } else { message.sender.clone() };

        self.store.record(message);
        self.client.notifier.echo(&author, &line);
    }

    /// Conversation with `other`, oldest first
    pub fn history(&self, other: &str) -> Vec<WhisperMessage> {
        self.store.history(&self.client.username(), other)
    }

    pub fn contacts(&self) -> BTreeSet<String> {
        self.store.contacts(&self.client.username())
    }

    /// Direct moderation of a listed user (the user list's context menu).
    /// Admin only, never cooldown-limited, and never aimed at yourself.
    pub fn moderate(&mut self, action: AdminAction, target: &str) -> DispatchOutcome {
        let command = action.as_str().to_string();
        let target = target.trim();

        let outcome = if !self.client.is_privileged() {
            DispatchOutcome::Unauthorized(command)
        } else if action.targets_user() && target.is_empty() {
            DispatchOutcome::MissingArgument {
                command,
                notice: format!("Please specify a user to {}.", action),
            }
        } else if action.targets_user() && target == self.client.username() {
            DispatchOutcome::Refused {
                command,
                notice: format!("You cannot {} yourself.", action),
            }
        } else {
            let target = action.targets_user().then_some(target);
            self.client.perform_admin_action(action, target);
            DispatchOutcome::Executed(command)
        };

        if let Some(notice) = outcome.notice() {
            self.client.notify(&notice);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::messaging::cooldown::COMMAND_COOLDOWN;
    use crate::application::test_support::{client, RecordingChannel, RecordingNotifier};
    use crate::domain::entities::Outbound;
    use crate::infrastructure::storage::MemoryBlobStore;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn session(privileged: bool) -> (ChatSession, Arc<RecordingNotifier>, Arc<RecordingChannel>) {
        let (client, _, notifier, channel) = client(privileged);
        let dispatcher = CommandDispatcher::new(COMMAND_COOLDOWN).with_rng(StdRng::seed_from_u64(3));
        let store = WhisperStore::open(Box::new(MemoryBlobStore::new()), 100);
        (ChatSession::new(client, dispatcher, store), notifier, channel)
    }

    #[test]
    fn test_plain_text_passes_through() {
        let (mut session, _, channel) = session(false);
        assert_eq!(session.submit("  hello all "), SubmitOutcome::Chat("hello all".to_string()));
        assert_eq!(session.submit("   "), SubmitOutcome::Ignored);
        assert!(channel.sent().is_empty());
    }

    #[test]
    fn test_whisper_mode_swallows_slash_commands() {
        let (mut session, _, channel) = session(true);
        session.enter_whisper_mode("carol");

        let outcome = session.submit("/kick bob");
        let SubmitOutcome::Whispered(msg) = outcome else { panic!("expected a whisper") };
        assert_eq!(msg.content, "/kick bob");
        assert_eq!(msg.recipient, "carol");
        assert_eq!(channel.sent().len(), 1);
        assert!(matches!(&channel.sent()[0], Outbound::Whisper(_)));
        assert_eq!(session.whisper_target(), Some("carol"));
    }

    #[test]
    fn test_explicit_whisper_while_whispering_goes_to_named_user() {
        let (mut session, _, channel) = session(false);
        session.enter_whisper_mode("carol");

        let SubmitOutcome::Whispered(msg) = session.submit("/w dave hi") else { panic!("expected a whisper") };
        assert_eq!(msg.recipient, "dave");
        assert_eq!(msg.content, "hi");
        assert_eq!(session.whisper_state(), &WhisperState::Whispering("carol".to_string()));

        let SubmitOutcome::Whispered(next) = session.submit("back to you") else { panic!("expected a whisper") };
        assert_eq!(next.recipient, "carol");
        assert_eq!(channel.sent().len(), 2);
        assert_eq!(session.history("dave").len(), 1);
    }

    #[test]
    fn test_bad_whisper_format_while_whispering() {
        let (mut session, notifier, channel) = session(false);
        session.enter_whisper_mode("carol");
        assert_eq!(session.submit("/w"), SubmitOutcome::WhisperRejected);
        assert_eq!(notifier.notices(), vec!["Whisper format: /w username message".to_string()]);
        assert!(channel.sent().is_empty());
    }

    #[test]
    fn test_explicit_whisper_does_not_change_mode() {
        let (mut session, _, _) = session(false);
        let outcome = session.submit("/w dave meet at   noon");
        let SubmitOutcome::Whispered(msg) = outcome else { panic!("expected a whisper") };
        assert_eq!(msg.recipient, "dave");
        assert_eq!(msg.content, "meet at noon");
        assert_eq!(session.whisper_state(), &WhisperState::Idle);
    }

    #[test]
    fn test_bad_whisper_format() {
        let (mut session, notifier, channel) = session(false);
        assert_eq!(session.submit("/whisper dave"), SubmitOutcome::WhisperRejected);
        assert_eq!(notifier.notices(), vec!["Whisper format: /w username message".to_string()]);
        assert!(channel.sent().is_empty());
    }

    #[test]
    fn test_exit_whisper_mode_restores_commands() {
        let (mut session, _, _) = session(false);
        session.enter_whisper_mode("carol");
        session.exit_whisper_mode();
        assert!(matches!(session.submit("/flip"), SubmitOutcome::Command(DispatchOutcome::Executed(_))));
    }

    #[test]
    fn test_receive_whisper_records_and_echoes() {
        let (mut session, notifier, _) = session(false);
        session.receive_whisper(WhisperMessage::new("erin", "tester", "psst", Utc::now()));

        assert_eq!(session.history("erin").len(), 1);
        assert_eq!(session.contacts().into_iter().collect::<Vec<_>>(), vec!["erin"]);
        assert_eq!(
            notifier.echoes(),
            vec![("erin".to_string(), "From erin (whisper): psst".to_string())]
        );
    }

    #[test]
    fn test_moderate_requires_privilege() {
        let (mut member, _, channel) = session(false);
        assert_eq!(member.moderate(AdminAction::Kick, "bob"), DispatchOutcome::Unauthorized("kick".to_string()));
        assert!(channel.sent().is_empty());

        let (mut admin, notifier, channel) = session(true);
        assert!(admin.moderate(AdminAction::Mute, "bob").is_executed());
        assert!(matches!(admin.moderate(AdminAction::Ban, "  "), DispatchOutcome::MissingArgument { .. }));
        assert_eq!(channel.sent().len(), 1);
        assert_eq!(notifier.notices(), vec!["Please specify a user to ban.".to_string()]);
    }

    #[test]
    fn test_moderating_yourself_is_refused() {
        let (mut admin, notifier, channel) = session(true);
        assert_eq!(
            admin.moderate(AdminAction::Kick, "tester"),
            DispatchOutcome::Refused {
                command: "kick".to_string(),
                notice: "You cannot kick yourself.".to_string(),
            }
        );
        assert_eq!(notifier.notices(), vec!["You cannot kick yourself.".to_string()]);
        assert!(channel.sent().is_empty());
    }
}
