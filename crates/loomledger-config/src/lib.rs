//! Configuration management for loomledger
//!
//! This module handles loading and validation of loomledger
//! configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Admin credentials for gated record amendments (optional)
    #[serde(default)]
    pub admin: Option<AdminConfig>,
}

// A missing section falls back to Default, so it must agree with the
// per-field default functions.
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            admin: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Admin credential configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

/// Business location configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationsConfig {
    /// Location names, each one an isolated ledger partition
    #[serde(default = "default_location_names")]
    pub names: Vec<String>,
    /// Partition selected at startup
    #[serde(default = "default_location")]
    pub default: String,
}

impl Default for LocationsConfig {
    fn default() -> Self {
        Self {
            names: default_location_names(),
            default: default_location(),
        }
    }
}

fn default_location_names() -> Vec<String> {
    vec!["main".to_string()]
}

fn default_location() -> String {
    "main".to_string()
}

/// Ledger display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Records shown when no explicit limit is chosen
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    /// Limit choices offered to clients
    #[serde(default = "default_limit_choices")]
    pub limit_choices: Vec<usize>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
            limit_choices: default_limit_choices(),
        }
    }
}

fn default_recent_limit() -> usize {
    10
}

fn default_limit_choices() -> Vec<usize> {
    vec![10, 25, 50, 100]
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Business locations
    #[serde(default)]
    pub locations: LocationsConfig,
    /// Ledger display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::IoError
            }
        })?;

        let config: Config =
            serde_yaml::from_str(&content).map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.locations.names.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "locations.names".to_string(),
                reason: "At least one location is required".to_string(),
            });
        }

        for (index, name) in self.locations.names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "locations.names".to_string(),
                    reason: "Location names must not be empty".to_string(),
                });
            }
            // Names are case sensitive; "Chennai" and "chennai" may coexist.
            if self.locations.names[..index].contains(name) {
                return Err(ConfigError::InvalidValue {
                    field: "locations.names".to_string(),
                    reason: format!("Duplicate location name: {}", name),
                });
            }
        }

        if !self.locations.names.contains(&self.locations.default) {
            return Err(ConfigError::InvalidValue {
                field: "locations.default".to_string(),
                reason: "Default location must be one of locations.names".to_string(),
            });
        }

        if self.display.recent_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "display.recent_limit".to_string(),
                reason: "Recent limit must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}
