//! Command handling - parsing, cooldown, dispatch

pub mod cooldown;
pub mod dice;
pub mod dispatcher;
pub mod handlers;
pub mod parser;

pub use cooldown::CooldownClock;
pub use dispatcher::{CommandDispatcher, DispatchOutcome};
pub use parser::{CommandInvocation, Input, MessageParser, WhisperCommand};
