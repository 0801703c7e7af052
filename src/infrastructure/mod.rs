//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: Whisper history backends
//! - Transport: Delivery channels and the fallback gateway
//! - Adapters: Frontends (console)

pub mod adapters;
pub mod config;
pub mod storage;
pub mod transport;
