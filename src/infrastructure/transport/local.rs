//! Local fallback - renders payloads in the client without any remote party

use std::sync::Arc;

use crate::application::errors::DeliveryError;
use crate::domain::entities::Outbound;
use crate::domain::traits::{Notifier, TransportChannel};

/// Author shown on locally synthesized AI messages
pub const AI_AUTHOR: &str = "AI Assistant";

pub struct LocalChannel {
    notifier: Arc<dyn Notifier>,
}

impl LocalChannel {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Show the payload locally. Never fails.
    pub fn render(&self, payload: &Outbound) {
        match payload {
            Outbound::AiMessage(msg) => self.notifier.echo(AI_AUTHOR, &msg.content),
            Outbound::AdminAction(req) => {
                let notice = match &req.target_user {
                    Some(target) => format!("{} action on {} recorded locally; no server connection", req.action, target),
                    None => format!("{} action on room {} recorded locally; no server connection", req.action, req.room),
                };
                self.notifier.notify(&notice);
            }
            Outbound::Whisper(msg) => {
                self.notifier.notify(&format!(
                    "Whisper to {} kept locally; no server connection",
                    msg.recipient
                ));
            }
        }
    }
}

impl TransportChannel for LocalChannel {
    fn name(&self) -> &'static str {
        "local"
    }

    fn is_available(&self, _payload: &Outbound) -> bool {
        true
    }

    fn deliver(&self, payload: &Outbound) -> Result<(), DeliveryError> {
        self.render(payload);
        Ok(())
    }
}
