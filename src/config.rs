use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::games::hangman::{Rules, DEFAULT_ATTEMPTS};

/// Server configuration, loadable from TOML. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the WebSocket listener binds to.
    pub addr: String,
    pub attempts_allowed: u32,
    pub case_sensitive: bool,
    /// Newline-separated word file; the embedded corpus is used when unset.
    pub word_list: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            addr: "127.0.0.1:4000".to_string(),
            attempts_allowed: DEFAULT_ATTEMPTS,
            case_sensitive: false,
            word_list: None,
            log_filter: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: ServerConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attempts_allowed == 0 {
            return Err(ConfigError::Validation(
                "attempts_allowed must be > 0".into(),
            ));
        }
        if self.addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "addr '{}' is not a socket address",
                self.addr
            )));
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Validation("log_filter must not be empty".into()));
        }
        Ok(())
    }

    pub fn rules(&self) -> Rules {
        Rules {
            attempts_allowed: self.attempts_allowed,
            case_sensitive: self.case_sensitive,
        }
    }

    /// TOML with every default spelled out, handy as a starting config file.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&ServerConfig::default()).unwrap_or_default()
    }
}
