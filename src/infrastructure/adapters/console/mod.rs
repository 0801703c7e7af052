//! Console adapter for local development
//!
//! Reads lines from stdin and feeds them to a `ChatSession`. A few
//! colon-prefixed inputs stand in for the buttons and menus of a graphical
//! client.

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::services::{ChatSession, SubmitOutcome, WhisperStore};
use crate::domain::entities::AdminAction;
use crate::domain::traits::Notifier;

/// Prints notices and echoes to stdout
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, text: &str) {
        println!("* {}", text);
    }

    fn echo(&self, author: &str, text: &str) {
        println!("[{}] {}", author, text);
    }
}

/// One line typed into the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// `:w <user>` - enter whisper mode
    Whisper(String),
    /// `:leave` - back to room chat
    Leave,
    /// `:history <user>`
    History(String),
    Contacts,
    /// `:kick|:ban|:mute <user>` - the user list's context menu
    Moderate(AdminAction, String),
    Quit,
    /// Anything else goes to `ChatSession::submit`
    Line(String),
}

impl ConsoleInput {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(meta) = trimmed.strip_prefix(':') else {
            return ConsoleInput::Line(trimmed.to_string());
        };

        let (name, arg) = match meta.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim().to_string()),
            None => (meta, String::new()),
        };

        match name.to_lowercase().as_str() {
            "w" | "whisper" => ConsoleInput::Whisper(arg),
            "leave" => ConsoleInput::Leave,
            "history" => ConsoleInput::History(arg),
            "contacts" => ConsoleInput::Contacts,
            "quit" | "q" => ConsoleInput::Quit,
            other => match other.parse::<AdminAction>() {
                Ok(action) if action.targets_user() => ConsoleInput::Moderate(action, arg),
                _ => ConsoleInput::Line(trimmed.to_string()),
            },
        }
    }
}

/// Print one conversation, oldest first
pub fn print_history(store: &WhisperStore, me: &str, other: &str) {
    let history = store.history(me, other);
    if history.is_empty() {
        println!("* No whispers with {}", other);
        return;
    }
    for message in history {
        println!(
            "{} {} -> {}: {}",
            message.timestamp.format("%Y-%m-%d %H:%M:%S"),
            message.sender,
            message.recipient,
            message.content
        );
    }
}

pub fn print_contacts(store: &WhisperStore, me: &str) {
    let contacts = store.contacts(me);
    if contacts.is_empty() {
        println!("* No whisper contacts yet");
        return;
    }
    for contact in contacts {
        println!("  {}", contact);
    }
}

/// Handle one console line; returns false when the loop should stop
pub fn handle_line(session: &mut ChatSession, line: &str) -> bool {
    match ConsoleInput::parse(line) {
        ConsoleInput::Quit => return false,
        ConsoleInput::Whisper(target) => {
            if session.enter_whisper_mode(&target) {
                println!("* Whispering to {} (:leave to stop)", target);
            }
        }
        ConsoleInput::Leave => {
            session.exit_whisper_mode();
            println!("* Back in #{}", session.client().room);
        }
        ConsoleInput::History(other) if other.is_empty() => println!("* Usage: :history <user>"),
        ConsoleInput::History(other) => print_history(session.store(), &session.client().username(), &other),
        ConsoleInput::Contacts => print_contacts(session.store(), &session.client().username()),
        ConsoleInput::Moderate(action, target) => {
            session.moderate(action, &target);
        }
        ConsoleInput::Line(text) => {
            if let SubmitOutcome::Chat(text) = session.submit(&text) {
                println!("[{}] {}", session.client().username(), text);
            }
        }
    }
    true
}

/// Read stdin until EOF or `:quit`
pub async fn run(mut session: ChatSession) -> std::io::Result<()> {
    let prompt_room = session.client().room.clone();
    tracing::info!("Console session started in #{}", prompt_room);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !handle_line(&mut session, &line) {
            break;
        }
    }

    tracing::info!("Console session ended");
    Ok(())
}
