//! Configuration module for evmatch-server.
//!
//! Handles loading configuration from an optional TOML file and applying
//! command line overrides.

pub mod file;

use crate::config::file::{FileConfig, MatcherConfig as FileMatcherConfig};
use evmatch_core::config::{MatcherConfig, MatcherConfigError};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("invalid matcher configuration: {0}")]
    Matcher(#[from] MatcherConfigError),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Runtime server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    pub max_body_bytes: usize,
}

/// Loaded configuration result containing all parts.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub matcher: MatcherConfig,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    /// Create a new config loader. Without a path, defaults are used.
    pub fn new(config_path: Option<impl AsRef<Path>>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            listen_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file, if one was given
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let mut file_config = match &self.config_path {
            Some(path) => {
                let config_content = std::fs::read_to_string(path)?;
                toml::from_str::<FileConfig>(&config_content)?
            }
            None => FileConfig::default(),
        };

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }

        let loaded = LoadedConfig {
            server: ServerConfig {
                listen: file_config.server.listen,
                max_body_bytes: file_config.server.max_body_bytes,
            },
            matcher: convert_matcher(&file_config.matcher),
        };
        self.validate(&loaded)?;
        Ok(loaded)
    }

    fn validate(&self, config: &LoadedConfig) -> Result<(), ConfigError> {
        if config.server.max_body_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "server.max_body_bytes must be greater than zero".to_string(),
            ));
        }
        config.matcher.validate()?;
        Ok(())
    }
}

fn convert_matcher(m: &FileMatcherConfig) -> MatcherConfig {
    MatcherConfig {
        max_request_skew: Duration::from_millis(m.max_request_skew),
        max_clock_skew: Duration::from_millis(m.max_clock_skew),
        max_queue_size: m.max_queue_size,
        max_distance: m.max_distance,
        interval: Duration::from_millis(m.interval),
    }
}
