//! Message parser - Splits raw input into commands and plain text

use crate::application::errors::CommandError;

/// Notice shown when a `/w` command is missing its recipient or message
pub const WHISPER_USAGE: &str = "Whisper format: /w username message";

/// A parsed `/name args...` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Lower-cased command name without the prefix
    pub name: String,
    /// Remaining tokens joined by single spaces
    pub args: String,
}

impl CommandInvocation {
    pub fn new(name: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            args: args.into(),
        }
    }

    /// First whitespace-delimited argument, if any
    pub fn first_arg(&self) -> Option<&str> {
        self.args.split_whitespace().next()
    }

    /// Everything after the first argument
    pub fn rest_args(&self) -> String {
        self.args.split_whitespace().skip(1).collect::<Vec<_>>().join(" ")
    }

    pub fn is_whisper(&self) -> bool {
        matches!(self.name.as_str(), "w" | "whisper")
    }
}

/// Parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(CommandInvocation),
    Text(String),
}

/// Recipient and body of an explicit `/w` or `/whisper` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhisperCommand {
    pub recipient: String,
    pub message: String,
}

impl WhisperCommand {
    pub fn from_invocation(invocation: &CommandInvocation) -> Result<Self, CommandError> {
        let recipient = invocation.first_arg().unwrap_or_default().to_string();
        let message = invocation.rest_args();
        if recipient.is_empty() || message.is_empty() {
            return Err(CommandError::InvalidArgs(WHISPER_USAGE.to_string()));
        }
        Ok(Self { recipient, message })
    }
}

/// Parses chat input into structured commands
#[derive(Debug, Clone)]
pub struct MessageParser {
    command_prefix: char,
}

impl MessageParser {
    pub fn new(prefix: char) -> Self {
        Self { command_prefix: prefix }
    }

    /// Parse a line of input
    pub fn parse(&self, text: &str) -> Input {
        let text = text.trim();

        let Some(cmd_text) = text.strip_prefix(self.command_prefix) else {
            return Input::Text(text.to_string());
        };

        let mut parts = cmd_text.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let args = parts.collect::<Vec<_>>().join(" ");

        Input::Command(CommandInvocation::new(name, args))
    }
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(text: &str) -> CommandInvocation {
        match MessageParser::default().parse(text) {
            Input::Command(inv) => inv,
            Input::Text(t) => panic!("expected a command, got text {:?}", t),
        }
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        let parser = MessageParser::default();
        assert_eq!(parser.parse("hello /there"), Input::Text("hello /there".to_string()));
        assert_eq!(parser.parse("  padded  "), Input::Text("padded".to_string()));
    }

    #[test]
    fn test_command_name_is_lowercased() {
        let inv = command("/ROLL 2d6");
        assert_eq!(inv.name, "roll");
        assert_eq!(inv.args, "2d6");
    }

    #[test]
    fn test_args_are_joined_by_single_spaces() {
        let inv = command("/aisay   hello    big \t world  ");
        assert_eq!(inv.name, "aisay");
        assert_eq!(inv.args, "hello big world");
        assert_eq!(inv.first_arg(), Some("hello"));
        assert_eq!(inv.rest_args(), "big world");
    }

    #[test]
    fn test_bare_prefix() {
        let inv = command("/");
        assert_eq!(inv.name, "");
        assert_eq!(inv.args, "");
        assert_eq!(inv.first_arg(), None);
    }

    #[test]
    fn test_whisper_command() {
        let inv = command("/W bob see you at   noon");
        assert!(inv.is_whisper());
        let whisper = WhisperCommand::from_invocation(&inv).unwrap();
        assert_eq!(whisper.recipient, "bob");
        assert_eq!(whisper.message, "see you at noon");

        let long = command("/whisper carol hi");
        assert!(long.is_whisper());
    }

    #[test]
    fn test_whisper_command_requires_message() {
        let inv = command("/w bob");
        assert_eq!(
            WhisperCommand::from_invocation(&inv),
            Err(CommandError::InvalidArgs(WHISPER_USAGE.to_string()))
        );
        assert!(WhisperCommand::from_invocation(&command("/w")).is_err());
    }

    #[test]
    fn test_custom_prefix() {
        let parser = MessageParser::new('!');
        assert!(matches!(parser.parse("!flip"), Input::Command(_)));
        assert!(matches!(parser.parse("/flip"), Input::Text(_)));
    }
}
