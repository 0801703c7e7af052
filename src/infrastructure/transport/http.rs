//! HTTP channel - posts admin actions and whispers to the chat server API
//!
//! Requests are fire-and-forget: `deliver` spawns the request on the ambient
//! tokio runtime and returns. A later failure is logged and shown as a local
//! notice; it never reaches back into command dispatch.

use std::sync::Arc;

use reqwest::Client;
use tokio::runtime::Handle;

use crate::application::errors::DeliveryError;
use crate::domain::entities::Outbound;
use crate::domain::traits::{Notifier, TransportChannel};

pub const ADMIN_ACTION_PATH: &str = "/api/admin/action";
pub const WHISPER_PATH: &str = "/api/whisper";

pub struct HttpChannel {
    client: Client,
    base_url: String,
    token: Option<String>,
    notifier: Arc<dyn Notifier>,
}

impl HttpChannel {
    pub fn new(base_url: impl Into<String>, token: Option<String>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            notifier,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Notices shown once the request settles
struct Outcome {
    success: Option<String>,
    failure: String,
}

fn describe(payload: &Outbound) -> Option<(&'static str, Outcome)> {
    match payload {
        Outbound::AdminAction(req) => {
            let target = req.target_user.as_deref().unwrap_or(req.room.as_str());
            Some((
                ADMIN_ACTION_PATH,
                Outcome {
                    success: Some(format!("{} action performed on {}", req.action, target)),
                    failure: format!("Failed to perform {} on {}", req.action, target),
                },
            ))
        }
        Outbound::Whisper(msg) => Some((
            WHISPER_PATH,
            Outcome {
                success: None,
                failure: format!("Failed to deliver whisper to {}", msg.recipient),
            },
        )),
        Outbound::AiMessage(_) => None,
    }
}

impl TransportChannel for HttpChannel {
    fn name(&self) -> &'static str {
        "http"
    }

    fn is_available(&self, payload: &Outbound) -> bool {
        describe(payload).is_some() && Handle::try_current().is_ok()
    }

    fn deliver(&self, payload: &Outbound) -> Result<(), DeliveryError> {
        let handle = Handle::try_current().map_err(|_| DeliveryError::Unavailable("http"))?;
        let (path, outcome) = describe(payload).ok_or(DeliveryError::Unavailable("http"))?;
        let body = payload
            .to_json()
            .map_err(|e| DeliveryError::Rejected(e.to_string()))?;

        let mut request = self.client.post(self.url(path)).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let notifier = self.notifier.clone();
        handle.spawn(async move {
            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    if let Some(notice) = outcome.success {
                        notifier.notify(&notice);
                    }
                }
                Ok(response) => {
                    let err = DeliveryError::Rejected(response.status().to_string());
                    tracing::warn!("POST {} failed: {}", path, err);
                    notifier.notify(&outcome.failure);
                }
                Err(e) => {
                    let err = DeliveryError::Network(e.to_string());
                    tracing::warn!("POST {} failed: {}", path, err);
                    notifier.notify(&outcome.failure);
                }
            }
        });

        Ok(())
    }
}
