//! Configuration loading

mod app_config;

pub use app_config::{
    AppConfig, BotSettings, ConfigError, DatabaseConfig, DirectoryConfig, Environment, SyncConfig,
};
