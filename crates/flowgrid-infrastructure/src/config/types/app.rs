//! Top-level application configuration

use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::database::DatabaseConfig;
use super::logging::LoggingConfig;
use super::variables::VariablesConfig;

/// Application configuration
///
/// Every section has sensible defaults, so an empty configuration file (or no
/// file at all) yields a runnable setup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Variable store configuration
    pub variables: VariablesConfig,
}
