//! Whisperline - chat client command engine with whispers and a transport fallback chain

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::context::ClientContext;
pub use application::messaging::{CommandDispatcher, DispatchOutcome};
pub use application::services::{ChatSession, SubmitOutcome, WhisperStore};
pub use infrastructure::transport::TransportGateway;
