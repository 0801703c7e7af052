//! Explicit per-session context handed to every component
//!
//! Holds the collaborators the host provides plus the transport chain, so
//! nothing in the engine reaches for global state.

use std::sync::Arc;

use crate::domain::entities::AdminAction;
use crate::domain::traits::{Clock, Identity, Notifier};
use crate::infrastructure::transport::TransportGateway;

pub struct ClientContext {
    pub identity: Arc<dyn Identity>,
    pub clock: Arc<dyn Clock>,
    pub notifier: Arc<dyn Notifier>,
    pub gateway: TransportGateway,
    /// Room the client is currently in
    pub room: String,
}

impl ClientContext {
    pub fn new(
        identity: Arc<dyn Identity>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
        gateway: TransportGateway,
        room: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            clock,
            notifier,
            gateway,
            room: room.into(),
        }
    }

    pub fn username(&self) -> String {
        self.identity.current_user()
    }

    pub fn is_privileged(&self) -> bool {
        self.identity.is_privileged()
    }

    /// Post a message as the AI participant; returns the accepting channel
    pub fn send_ai_message(&self, content: impl Into<String>) -> &'static str {
        self.gateway.deliver_ai_message(content, &self.room)
    }

    /// Perform a moderation action in the current room; returns the accepting channel
    pub fn perform_admin_action(&self, action: AdminAction, target: Option<&str>) -> &'static str {
        self.gateway.deliver_admin_action(action, target, &self.room)
    }

    pub fn notify(&self, text: &str) {
        self.notifier.notify(text);
    }
}
