//! Transport gateway - Priority-ordered delivery chain
//!
//! Remote channels are tried in the order they were registered; the local
//! channel always comes last and always accepts.

pub mod host;
pub mod http;
pub mod live;
pub mod local;

pub use host::HostChannel;
pub use http::HttpChannel;
pub use live::{LiveBinding, LiveChannel, LiveEvent};
pub use local::LocalChannel;

use crate::domain::entities::{AdminAction, AdminActionRequest, AiMessage, Outbound, WhisperMessage};
use crate::domain::traits::TransportChannel;

pub struct TransportGateway {
    channels: Vec<Box<dyn TransportChannel>>,
    fallback: LocalChannel,
}

impl TransportGateway {
    pub fn new(fallback: LocalChannel) -> Self {
        Self {
            channels: Vec::new(),
            fallback,
        }
    }

    /// Append a channel; earlier channels have higher priority
    pub fn with_channel<C: TransportChannel + 'static>(mut self, channel: C) -> Self {
        self.channels.push(Box::new(channel));
        self
    }

    /// Channel names in priority order, the local fallback last
    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels
            .iter()
            .map(|c| c.name())
            .chain(std::iter::once(self.fallback.name()))
            .collect()
    }

    /// Try each channel once; returns the name of the one that accepted
    pub fn deliver(&self, payload: &Outbound) -> &'static str {
        for channel in &self.channels {
            if !channel.is_available(payload) {
                continue;
            }
            match channel.deliver(payload) {
                Ok(()) => {
                    tracing::debug!("{} delivered via {}", payload.event_name(), channel.name());
                    return channel.name();
                }
                Err(e) => {
                    tracing::warn!("{} channel failed for {}: {}", channel.name(), payload.event_name(), e);
                }
            }
        }

        self.fallback.render(payload);
        self.fallback.name()
    }

    pub fn deliver_ai_message(&self, content: impl Into<String>, room: &str) -> &'static str {
        self.deliver(&Outbound::AiMessage(AiMessage {
            content: content.into(),
            room: room.to_string(),
            is_command: true,
        }))
    }

    pub fn deliver_admin_action(&self, action: AdminAction, target: Option<&str>, room: &str) -> &'static str {
        self.deliver(&Outbound::AdminAction(AdminActionRequest {
            action,
            target_user: target.map(str::to_string),
            room: room.to_string(),
        }))
    }

    pub fn deliver_whisper(&self, message: &WhisperMessage) -> &'static str {
        self.deliver(&Outbound::Whisper(message.clone()))
    }
}
