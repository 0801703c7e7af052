use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of whispers kept per conversation
pub const WHISPER_HISTORY_SIZE: usize = 100;

/// A private one-to-one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhisperMessage {
    pub sender: String,
    pub recipient: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "isAIDirected", alias = "isAI", default)]
    pub is_ai_directed: bool,
}

impl WhisperMessage {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let recipient = recipient.into();
        Self {
            is_ai_directed: is_ai_recipient(&recipient),
            sender: sender.into(),
            recipient,
            content: content.into(),
            timestamp,
        }
    }

    pub fn key(&self) -> String {
        conversation_key(&self.sender, &self.recipient)
    }

    /// The participant that is not `me`
    pub fn counterpart(&self, me: &str) -> &str {
        if self.sender == me {
            &self.recipient
        } else {
            &self.sender
        }
    }

    pub fn involves(&self, user: &str) -> bool {
        self.sender == user || self.recipient == user
    }
}

/// Whispers addressed to the AI participant are flagged so the host can route them
pub fn is_ai_recipient(recipient: &str) -> bool {
    recipient == "AI" || recipient.to_lowercase().contains("ai")
}

/// Order-independent key for the conversation between two participants
pub fn conversation_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{}-{}", a, b)
    } else {
        format!("{}-{}", b, a)
    }
}

/// Bounded whisper history of one conversation, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    messages: VecDeque<WhisperMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends, evicting from the front until `capacity` holds
    pub fn push(&mut self, message: WhisperMessage, capacity: usize) {
        self.messages.push_back(message);
        while self.messages.len() > capacity {
            self.messages.pop_front();
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &WhisperMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
