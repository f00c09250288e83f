//! Configuration loading and management
//!
//! Handles parsing of `.rota.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote task store settings
    #[serde(default)]
    pub remote: RemoteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
        }
    }
}

/// Remote store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the task API, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-call timeout; a timed-out call counts as a transport failure
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from a `.rota.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(".rota.toml");
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> crate::error::Result<()> {
        self.remote.validate()
    }
}

impl RemoteConfig {
    pub fn validate(&self) -> crate::error::Result<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "remote.base_url cannot be empty".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(crate::error::Error::InvalidConfig(format!(
                "remote.base_url must be an http(s) URL, got '{url}'"
            )));
        }
        if self.timeout_secs == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "remote.timeout_secs must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
