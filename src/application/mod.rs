//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Context: the collaborators one chat session works with
//! - Messaging: command parsing, cooldown and dispatch
//! - Services: chat session, whisper mode and whisper history
//! - Errors: layer-specific errors

pub mod context;
pub mod errors;
pub mod messaging;
pub mod services;

#[cfg(test)]
pub mod test_support;
