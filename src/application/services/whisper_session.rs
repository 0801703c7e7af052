//! Whisper mode - who the local client is currently whispering to

use crate::application::context::ClientContext;
use crate::domain::entities::WhisperMessage;

use super::whisper_store::WhisperStore;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WhisperState {
    #[default]
    Idle,
    Whispering(String),
}

/// Tracks whisper mode and composes outgoing whispers.
///
/// State lives only as long as the session; it is never persisted.
#[derive(Debug, Default)]
pub struct WhisperSessionController {
    state: WhisperState,
}

impl WhisperSessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WhisperState {
        &self.state
    }

    pub fn target(&self) -> Option<&str> {
        match &self.state {
            WhisperState::Idle => None,
            WhisperState::Whispering(target) => Some(target),
        }
    }

    /// Start (or re-target) whisper mode. Blank targets are refused.
    pub fn enter(&mut self, target: &str) -> bool {
        let target = target.trim();
        if target.is_empty() {
            return false;
        }
        tracing::debug!("Whisper mode: {}", target);
        self.state = WhisperState::Whispering(target.to_string());
        true
    }

    pub fn exit(&mut self) {
        self.state = WhisperState::Idle;
    }

    /// Record, deliver and echo a whisper. Blank content sends nothing.
    pub fn send(
        &self,
        recipient: &str,
        content: &str,
        client: &ClientContext,
        store: &mut WhisperStore,
    ) -> Option<WhisperMessage> {
        if content.trim().is_empty() {
            return None;
        }

        let message = WhisperMessage::new(client.username(), recipient, content, client.clock.now());
        store.record(message.clone());

        // History is already written; a delivery problem never rolls it back.
        let channel = client.gateway.deliver_whisper(&message);
        tracing::debug!("Whisper to {} handed to {}", recipient, channel);

        client
            .notifier
            .echo("You", &format!("To {} (whisper): {}", recipient, content));
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::client;
    use crate::domain::entities::Outbound;
    use crate::infrastructure::storage::MemoryBlobStore;

    #[test]
    fn test_state_machine() {
        let mut controller = WhisperSessionController::new();
        assert_eq!(controller.state(), &WhisperState::Idle);

        assert!(controller.enter("carol"));
        assert_eq!(controller.target(), Some("carol"));

        assert!(controller.enter("dave"));
        assert_eq!(controller.state(), &WhisperState::Whispering("dave".to_string()));

        assert!(!controller.enter("   "));
        assert_eq!(controller.target(), Some("dave"));

        controller.exit();
        assert_eq!(controller.target(), None);
    }

    #[test]
    fn test_send_records_delivers_and_echoes() {
        let (client, _, notifier, channel) = client(false);
        let mut store = WhisperStore::open(Box::new(MemoryBlobStore::new()), 100);
        let controller = WhisperSessionController::new();

        let message = controller.send("carol", "hello", &client, &mut store).unwrap();
        assert_eq!(message.sender, "tester");
        assert_eq!(message.recipient, "carol");

        assert_eq!(store.history("tester", "carol"), vec![message.clone()]);
        assert_eq!(channel.sent(), vec![Outbound::Whisper(message)]);
        assert_eq!(
            notifier.echoes(),
            vec![("You".to_string(), "To carol (whisper): hello".to_string())]
        );
    }

    #[test]
    fn test_blank_whisper_is_ignored() {
        let (client, _, _, channel) = client(false);
        let mut store = WhisperStore::open(Box::new(MemoryBlobStore::new()), 100);
        let controller = WhisperSessionController::new();

        assert!(controller.send("carol", "  ", &client, &mut store).is_none());
        assert!(store.is_empty());
        assert!(channel.sent().is_empty());
    }
}
