//! Frontends that drive a chat session

pub mod console;

pub use console::{ConsoleInput, ConsoleNotifier};
