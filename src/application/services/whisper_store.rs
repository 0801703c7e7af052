//! Whisper history - conversation-keyed, capacity-bounded, persisted on every write

use std::collections::{BTreeMap, BTreeSet};

use crate::application::errors::StorageError;
use crate::domain::entities::{conversation_key, Conversation, WhisperMessage};
use crate::domain::traits::BlobStore;

/// Name of the durable blob holding the whole history
pub const HISTORY_BLOB: &str = "whisperHistory";

/// Sole owner of all conversations
pub struct WhisperStore {
    conversations: BTreeMap<String, Conversation>,
    capacity: usize,
    backend: Box<dyn BlobStore>,
}

impl WhisperStore {
    /// Load history from `backend`. A missing or unreadable blob starts an
    /// empty store; it is never an error.
    pub fn open(backend: Box<dyn BlobStore>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut conversations = match backend.load(HISTORY_BLOB) {
            Ok(Some(blob)) => match serde_json::from_str::<BTreeMap<String, Conversation>>(&blob) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!("Whisper history is corrupt, starting empty: {}", e);
                    BTreeMap::new()
                }
            },
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Failed to load whisper history, starting empty: {}", e);
                BTreeMap::new()
            }
        };

        // Capacity may have shrunk since the blob was written.
        for conversation in conversations.values_mut() {
            let mut trimmed = Conversation::new();
            for message in conversation.messages().cloned() {
                trimmed.push(message, capacity);
            }
            *conversation = trimmed;
        }
        conversations.retain(|_, c| !c.is_empty());

        tracing::debug!("Loaded {} whisper conversations", conversations.len());
        Self {
            conversations,
            capacity,
            backend,
        }
    }

    /// Append a whisper to its conversation and write the whole store through
    pub fn record(&mut self, message: WhisperMessage) -> &Conversation {
        let key = message.key();
        self.conversations
            .entry(key.clone())
            .or_default()
            .push(message, self.capacity);

        if let Err(e) = self.persist() {
            tracing::warn!("Failed to save whisper history: {}", e);
        }

        &self.conversations[&key]
    }

    /// Messages between `me` and `other`, oldest first
    pub fn history(&self, me: &str, other: &str) -> Vec<WhisperMessage> {
        let mut messages: Vec<WhisperMessage> = self
            .conversations
            .get(&conversation_key(me, other))
            .map(|c| c.messages().cloned().collect())
            .unwrap_or_default();
        messages.sort_by_key(|m| m.timestamp);
        messages
    }

    /// Everyone `me` has a conversation with
    pub fn contacts(&self, me: &str) -> BTreeSet<String> {
        self.conversations
            .values()
            .flat_map(|c| c.messages())
            .filter(|m| m.involves(me))
            .map(|m| m.counterpart(me))
            .filter(|other| *other != me)
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    fn persist(&self) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&self.conversations)?;
        self.backend.save(HISTORY_BLOB, &blob)
    }
}
