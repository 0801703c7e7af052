//! Live event channel - a bound bidirectional event stream (e.g. a socket bridge)

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

use crate::application::errors::DeliveryError;
use crate::domain::entities::{Outbound, WhisperMessage};
use crate::domain::traits::TransportChannel;

/// One named event on the live channel
#[derive(Debug, Clone, PartialEq)]
pub struct LiveEvent {
    pub event: String,
    pub payload: Value,
}

impl LiveEvent {
    pub fn new(event: impl Into<String>, payload: Value) -> Self {
        Self {
            event: event.into(),
            payload,
        }
    }

    /// Decode an inbound `whisper` event
    pub fn whisper(&self) -> Option<WhisperMessage> {
        if self.event != "whisper" {
            return None;
        }
        match serde_json::from_value(self.payload.clone()) {
            Ok(msg) => Some(msg),
            Err(e) => {
                tracing::warn!("Ignoring malformed whisper event: {}", e);
                None
            }
        }
    }
}

/// Shared slot the host binds its outgoing event sender into
#[derive(Debug, Clone, Default)]
pub struct LiveBinding {
    slot: Arc<Mutex<Option<UnboundedSender<LiveEvent>>>>,
}

impl LiveBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&self, sender: UnboundedSender<LiveEvent>) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(sender);
        }
    }

    pub fn unbind(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }

    pub fn is_bound(&self) -> bool {
        self.slot
            .lock()
            .map(|slot| slot.as_ref().is_some_and(|tx| !tx.is_closed()))
            .unwrap_or(false)
    }

    fn send(&self, event: LiveEvent) -> Result<(), DeliveryError> {
        let slot = self.slot.lock().map_err(|_| DeliveryError::Unavailable("live"))?;
        let tx = slot.as_ref().ok_or(DeliveryError::Unavailable("live"))?;
        tx.send(event)
            .map_err(|_| DeliveryError::Rejected("live channel closed".to_string()))
    }
}

pub struct LiveChannel {
    binding: LiveBinding,
}

impl LiveChannel {
    pub fn new(binding: LiveBinding) -> Self {
        Self { binding }
    }
}

impl TransportChannel for LiveChannel {
    fn name(&self) -> &'static str {
        "live"
    }

    fn is_available(&self, _payload: &Outbound) -> bool {
        self.binding.is_bound()
    }

    fn deliver(&self, payload: &Outbound) -> Result<(), DeliveryError> {
        let body = payload
            .event_payload()
            .map_err(|e| DeliveryError::Rejected(e.to_string()))?;
        self.binding.send(LiveEvent::new(payload.event_name(), body))
    }
}
