//! # alliance-common
//!
//! Shared utilities: configuration and telemetry.

pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    AppConfig, BotSettings, ConfigError, DatabaseConfig, DirectoryConfig, Environment, SyncConfig,
};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
