// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the Battlesnake bot

use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::Direction;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub customization: CustomizationConfig,
    pub selection: SelectionConfig,
    pub debug: DebugConfig,
}

/// Listening socket settings
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub default_port: u16,
    pub address: String,
}

impl ServerConfig {
    /// Picks the listening port from the value of the `PORT` environment variable
    ///
    /// An unset or unparseable value falls back to `default_port`.
    pub fn resolve_port(&self, env_value: Option<&str>) -> u16 {
        match env_value {
            Some(raw) => match raw.trim().parse::<u16>() {
                Ok(port) => port,
                Err(e) => {
                    warn!(
                        "Ignoring invalid PORT value '{}' ({}), using {}",
                        raw, e, self.default_port
                    );
                    self.default_port
                }
            },
            None => self.default_port,
        }
    }
}

/// Appearance returned from GET /
#[derive(Debug, Deserialize, Clone)]
pub struct CustomizationConfig {
    pub apiversion: String,
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
}

/// Move selection settings
#[derive(Debug, Deserialize, Clone)]
pub struct SelectionConfig {
    /// Returned when none of the four candidates is safe
    pub fallback_direction: Direction,
    /// Fixed seed for reproducible runs; seeded from the OS when absent
    #[serde(default)]
    pub rng_seed: Option<u64>,
    #[serde(default)]
    pub shout: Option<String>,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            server: ServerConfig {
                default_port: 8080,
                address: "0.0.0.0".to_string(),
            },
            customization: CustomizationConfig {
                apiversion: "1".to_string(),
                author: "bd".to_string(),
                color: "#888800".to_string(),
                head: "default".to_string(),
                tail: "default".to_string(),
            },
            selection: SelectionConfig {
                fallback_direction: Direction::Left,
                rng_seed: None,
                shout: None,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
