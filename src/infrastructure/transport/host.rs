//! Host channel - message/action functions exposed by the embedding application

use crate::application::errors::DeliveryError;
use crate::domain::entities::{AdminActionRequest, AiMessage, Outbound};
use crate::domain::traits::TransportChannel;

/// Host function posting a message as the AI participant
pub type MessageFn = Box<dyn Fn(&AiMessage) -> Result<(), DeliveryError> + Send + Sync>;

/// Host function performing a moderation action
pub type ActionFn = Box<dyn Fn(&AdminActionRequest) -> Result<(), DeliveryError> + Send + Sync>;

/// Whispers are never routed through host functions.
#[derive(Default)]
pub struct HostChannel {
    send_message: Option<MessageFn>,
    admin_action: Option<ActionFn>,
}

impl HostChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&AiMessage) -> Result<(), DeliveryError> + Send + Sync + 'static,
    {
        self.send_message = Some(Box::new(f));
        self
    }

    pub fn with_action_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&AdminActionRequest) -> Result<(), DeliveryError> + Send + Sync + 'static,
    {
        self.admin_action = Some(Box::new(f));
        self
    }
}

impl TransportChannel for HostChannel {
    fn name(&self) -> &'static str {
        "host"
    }

    fn is_available(&self, payload: &Outbound) -> bool {
        match payload {
            Outbound::AiMessage(_) => self.send_message.is_some(),
            Outbound::AdminAction(_) => self.admin_action.is_some(),
            Outbound::Whisper(_) => false,
        }
    }

    fn deliver(&self, payload: &Outbound) -> Result<(), DeliveryError> {
        match (payload, &self.send_message, &self.admin_action) {
            (Outbound::AiMessage(msg), Some(f), _) => f(msg),
            (Outbound::AdminAction(req), _, Some(f)) => f(req),
            _ => Err(DeliveryError::Unavailable("host")),
        }
    }
}
