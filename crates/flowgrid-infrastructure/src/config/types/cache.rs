//! Cache configuration types

use crate::constants::{CACHE_DEFAULT_MAX_ENTRIES, CACHE_DEFAULT_TTL_SECS, DEFAULT_CACHE_PROVIDER};
use serde::{Deserialize, Serialize};

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache provider name (e.g., "moka", "null")
    pub provider: String,

    /// Maximum cache size in entries
    pub max_entries: u64,

    /// Default TTL in seconds
    pub default_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_CACHE_PROVIDER.to_string(),
            max_entries: CACHE_DEFAULT_MAX_ENTRIES,
            default_ttl_secs: CACHE_DEFAULT_TTL_SECS,
        }
    }
}
