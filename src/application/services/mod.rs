//! Application services - session state and whisper history

pub mod chat_session;
pub mod whisper_session;
pub mod whisper_store;

pub use chat_session::{ChatSession, SubmitOutcome};
pub use whisper_session::{WhisperSessionController, WhisperState};
pub use whisper_store::{WhisperStore, HISTORY_BLOB};
