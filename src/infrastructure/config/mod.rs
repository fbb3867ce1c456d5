//! Configuration management

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::errors::ConfigError;
use crate::domain::entities::{ButtonStyle, DEFAULT_LABEL};

/// Toggle-registry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub store: StoreConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StoreConfig {
    /// Where the binding state file lives.
    pub path: PathBuf,
    /// Upper bound on a single persist attempt before it is logged and
    /// abandoned; memory stays authoritative.
    pub save_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DefaultsConfig {
    /// Label used when an attach gives none.
    pub label: String,
    /// Style used when an attach gives none; unset means a random pick.
    pub style: Option<ButtonStyle>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                path: PathBuf::from("reaction_roles.json"),
                save_timeout_seconds: 5,
            },
            defaults: DefaultsConfig {
                label: DEFAULT_LABEL.to_string(),
                style: None,
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();

        if let Ok(path) = std::env::var("TOGGLE_STATE_FILE") {
            config.store.path = PathBuf::from(path);
        }
        if let Ok(label) = std::env::var("TOGGLE_DEFAULT_LABEL") {
            config.defaults.label = label;
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.save_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue(
                "store.save-timeout-seconds must be positive".to_string(),
            ));
        }
        if self.defaults.label.is_empty() {
            return Err(ConfigError::InvalidValue(
                "defaults.label must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn save_timeout(&self) -> Duration {
        Duration::from_secs(self.store.save_timeout_seconds)
    }
}
