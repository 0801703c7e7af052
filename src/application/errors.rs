//! Application layer errors

use thiserror::Error;

/// General client errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Command execution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// A required argument was not supplied; the payload is the notice shown to the user
    #[error("{0}")]
    MissingArgument(String),

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Lock poisoned")]
    Poisoned,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Transport delivery errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Channel {0} is not available")]
    Unavailable(&'static str),

    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),
}
