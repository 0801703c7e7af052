//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod payload;
pub mod command;
pub mod whisper;

pub use user::{User, Role};
pub use payload::{AdminAction, AdminActionRequest, AiMessage, Outbound};
pub use command::{Command, CommandHandler, CommandRegistry, CommandTable};
pub use whisper::{conversation_key, Conversation, WhisperMessage, WHISPER_HISTORY_SIZE};
