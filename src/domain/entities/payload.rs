use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::WhisperMessage;

/// Moderation action performed on a room or a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminAction {
    Kick,
    Ban,
    Mute,
    Close,
}

impl AdminAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminAction::Kick => "kick",
            AdminAction::Ban => "ban",
            AdminAction::Mute => "mute",
            AdminAction::Close => "close",
        }
    }

    /// Whether the action needs a target user
    pub fn targets_user(&self) -> bool {
        !matches!(self, AdminAction::Close)
    }
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kick" => Ok(AdminAction::Kick),
            "ban" => Ok(AdminAction::Ban),
            "mute" => Ok(AdminAction::Mute),
            "close" => Ok(AdminAction::Close),
            other => Err(format!("unknown admin action: {}", other)),
        }
    }
}

/// Message the AI participant posts into the room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiMessage {
    pub content: String,
    pub room: String,
    pub is_command: bool,
}

/// Body of the `admin-action` event and of `POST /api/admin/action`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminActionRequest {
    pub action: AdminAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_user: Option<String>,
    pub room: String,
}

/// Everything the client sends out through the transport chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    AiMessage(AiMessage),
    AdminAction(AdminActionRequest),
    Whisper(WhisperMessage),
}

impl Outbound {
    /// Event name on the live channel
    pub fn event_name(&self) -> &'static str {
        match self {
            Outbound::AiMessage(_) => "ai-message",
            Outbound::AdminAction(req) if req.action == AdminAction::Close => "close-room",
            Outbound::AdminAction(_) => "admin-action",
            Outbound::Whisper(_) => "whisper",
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Outbound::AiMessage(msg) => serde_json::to_value(msg),
            Outbound::AdminAction(req) => serde_json::to_value(req),
            Outbound::Whisper(msg) => serde_json::to_value(msg),
        }
    }

    /// Body of the live event; `close-room` carries only the room
    pub fn event_payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Outbound::AdminAction(req) if req.action == AdminAction::Close => {
                Ok(serde_json::json!({ "room": req.room }))
            }
            _ => self.to_json(),
        }
    }
}
