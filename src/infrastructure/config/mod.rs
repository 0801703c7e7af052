//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::errors::ConfigError;
use crate::domain::entities::{Role, User, WHISPER_HISTORY_SIZE};
use crate::domain::traits::BlobStore;
use crate::infrastructure::storage::{JsonFileStore, SqliteBlobStore};

/// Longest accepted user command cooldown (one year)
pub const MAX_COOLDOWN_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Client configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub client: ClientConfig,
    pub commands: CommandsConfig,
    pub whisper: WhisperConfig,
    pub transport: TransportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ClientConfig {
    pub username: String,
    pub room: String,
    /// Grants the admin command table
    pub admin: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CommandsConfig {
    pub cooldown_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    Json,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct WhisperConfig {
    pub history_size: usize,
    pub backend: HistoryBackend,
    /// Directory the history is written to
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TransportConfig {
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HttpConfig {
    pub enabled: bool,
    pub base_url: Option<String>,
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            username: "User".to_string(),
            room: "general".to_string(),
            admin: false,
        }
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self { cooldown_seconds: 600 }
    }
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self {
            history_size: WHISPER_HISTORY_SIZE,
            backend: HistoryBackend::Json,
            path: PathBuf::from("data"),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `WHISPERLINE_*` environment variables
    pub fn load_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Config file when present, defaults otherwise; env always wins
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if !path.as_ref().exists() {
            let config = Config::load_env();
            config.validate()?;
            return Ok(config);
        }
        let mut config = Config::load(path)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        if let Ok(user) = std::env::var("WHISPERLINE_USER") {
            self.client.username = user;
        }
        if let Ok(room) = std::env::var("WHISPERLINE_ROOM") {
            self.client.room = room;
        }
        if let Ok(admin) = std::env::var("WHISPERLINE_ADMIN") {
            self.client.admin = matches!(admin.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Ok(url) = std::env::var("WHISPERLINE_API") {
            self.transport.http.base_url = Some(url);
            self.transport.http.enabled = true;
        }
        if let Ok(token) = std::env::var("WHISPERLINE_TOKEN") {
            self.transport.http.token = Some(token);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client.username.trim().is_empty() {
            return Err(ConfigError::InvalidValue("client.username must not be empty".to_string()));
        }
        if self.commands.cooldown_seconds > MAX_COOLDOWN_SECONDS {
            return Err(ConfigError::InvalidValue(format!(
                "commands.cooldown-seconds must be at most {}",
                MAX_COOLDOWN_SECONDS
            )));
        }
        if self.whisper.history_size == 0 {
            return Err(ConfigError::InvalidValue("whisper.history-size must be at least 1".to_string()));
        }
        if self.transport.http.enabled && self.transport.http.base_url.is_none() {
            return Err(ConfigError::InvalidValue(
                "transport.http.base-url is required when http is enabled".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// The local user
    pub fn user(&self) -> User {
        let role = if self.client.admin { Role::Admin } else { Role::Member };
        User::new(self.client.username.trim()).with_role(role)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.commands.cooldown_seconds)
    }

    /// Open the configured history backend
    pub fn history_backend(&self) -> Result<Box<dyn BlobStore>, ConfigError> {
        let dir = &self.whisper.path;
        match self.whisper.backend {
            HistoryBackend::Json => Ok(Box::new(JsonFileStore::new(dir))),
            HistoryBackend::Sqlite => SqliteBlobStore::open(dir.join("whisperline.db"))
                .map(|store| Box::new(store) as Box<dyn BlobStore>)
                .map_err(|e| ConfigError::InvalidValue(format!("cannot open history database: {}", e))),
        }
    }

    /// HTTP endpoint, if enabled
    pub fn http_endpoint(&self) -> Option<(&str, Option<String>)> {
        let http = &self.transport.http;
        if !http.enabled {
            return None;
        }
        http.base_url.as_deref().map(|url| (url, http.token.clone()))
    }
}
