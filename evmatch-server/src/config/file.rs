//! TOML file configuration structures.
//!
//! These structs directly map to the `evmatch.toml` file format. Every
//! field has a default, so an empty file is a valid configuration.

use evmatch_core::config::{
    DEFAULT_INTERVAL, DEFAULT_MAX_CLOCK_SKEW, DEFAULT_MAX_DISTANCE, DEFAULT_MAX_QUEUE_SIZE,
    DEFAULT_MAX_REQUEST_SKEW,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8888").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
    /// Largest accepted request body, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8888))
}

fn default_max_body_bytes() -> usize {
    1024
}

/// Matcher section. Times are in milliseconds, distances in meters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    #[serde(default = "default_max_request_skew")]
    pub max_request_skew: u64,
    #[serde(default = "default_max_clock_skew")]
    pub max_clock_skew: u64,
    #[serde(default = "default_max_queue_size")]
    pub max_queue_size: usize,
    #[serde(default = "default_max_distance")]
    pub max_distance: f64,
    #[serde(default = "default_interval")]
    pub interval: u64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_request_skew: default_max_request_skew(),
            max_clock_skew: default_max_clock_skew(),
            max_queue_size: default_max_queue_size(),
            max_distance: default_max_distance(),
            interval: default_interval(),
        }
    }
}

fn default_max_request_skew() -> u64 {
    DEFAULT_MAX_REQUEST_SKEW.as_millis() as u64
}

fn default_max_clock_skew() -> u64 {
    DEFAULT_MAX_CLOCK_SKEW.as_millis() as u64
}

fn default_max_queue_size() -> usize {
    DEFAULT_MAX_QUEUE_SIZE
}

fn default_max_distance() -> f64 {
    DEFAULT_MAX_DISTANCE
}

fn default_interval() -> u64 {
    DEFAULT_INTERVAL.as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"
max_body_bytes = 2048

[matcher]
max_request_skew = 5000
max_clock_skew = 250
max_queue_size = 50
max_distance = 42.5
interval = 100
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.server.max_body_bytes, 2048);
        assert_eq!(config.matcher.max_request_skew, 5000);
        assert_eq!(config.matcher.max_clock_skew, 250);
        assert_eq!(config.matcher.max_queue_size, 50);
        assert_eq!(config.matcher.max_distance, 42.5);
        assert_eq!(config.matcher.interval, 100);
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: FileConfig = toml::from_str("[matcher]\nmax_queue_size = 10\n").unwrap();
        assert_eq!(config.server.listen.port(), 8888);
        assert_eq!(config.server.max_body_bytes, 1024);
        assert_eq!(config.matcher.max_queue_size, 10);
        assert_eq!(config.matcher.max_request_skew, 3000);
        assert_eq!(config.matcher.max_clock_skew, 100);
        assert_eq!(config.matcher.max_distance, 100.0);
        assert_eq!(config.matcher.interval, 400);

        let empty: FileConfig = toml::from_str("").unwrap();
        assert_eq!(empty.matcher.max_queue_size, 1000);
    }
}
