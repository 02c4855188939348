//! Application configuration structs
//!
//! Loads configuration from environment variables and `.env` files.

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub bot: BotSettings,
    pub database: DatabaseConfig,
    pub directory: DirectoryConfig,
    pub sync: SyncConfig,
}

/// Bot identity settings
#[derive(Debug, Clone, Deserialize)]
pub struct BotSettings {
    /// The bot's own character name, skipped during reconciliation
    pub name: String,
    /// Game dimension (server shard) the rosters belong to
    #[serde(default = "default_dimension")]
    pub dimension: u8,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// People-directory client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default = "default_directory_base_url")]
    pub base_url: String,
    /// Per-fetch timeout; a timed-out fetch counts as a failed one
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

/// Roster sync scheduling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_sync_interval_hours")]
    pub interval_hours: u64,
}

// Default value functions
fn default_dimension() -> u8 {
    5
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_directory_base_url() -> String {
    "http://people.anarchy-online.com/org/stats".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_sync_interval_hours() -> u64 {
    24
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            bot: BotSettings {
                name: env::var("BOT_NAME").map_err(|_| ConfigError::MissingVar("BOT_NAME"))?,
                dimension: env::var("DIMENSION")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_dimension),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            directory: DirectoryConfig {
                base_url: env::var("DIRECTORY_BASE_URL")
                    .unwrap_or_else(|_| default_directory_base_url()),
                fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_fetch_timeout_secs),
            },
            sync: SyncConfig {
                interval_hours: env::var("SYNC_INTERVAL_HOURS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_sync_interval_hours),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_dimension(), 5);
        assert_eq!(default_max_connections(), 10);
        assert_eq!(default_fetch_timeout_secs(), 30);
        assert_eq!(default_sync_interval_hours(), 24);
        assert!(default_directory_base_url().starts_with("http"));
    }
}
