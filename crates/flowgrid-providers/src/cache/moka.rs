//! Moka in-memory cache provider
//!
//! High-performance concurrent in-process cache. Capacity and TTL come from
//! configuration; per-entry TTLs are not supported by this backend, the
//! cache-level TTL applies to every entry.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use flowgrid_application::registry::{CACHE_PROVIDERS, CacheProviderEntry};
use flowgrid_domain::error::Result;
use flowgrid_domain::ports::CacheProvider;

use crate::constants::{CACHE_DEFAULT_MAX_ENTRIES, CACHE_DEFAULT_TTL_SECS};

/// Moka-based cache provider
#[derive(Clone)]
pub struct MokaCacheProvider {
    cache: Cache<String, String>,
}

impl Default for MokaCacheProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaCacheProvider {
    /// Create a cache with default capacity and TTL
    pub fn new() -> Self {
        Self::with_config(
            CACHE_DEFAULT_MAX_ENTRIES,
            Duration::from_secs(CACHE_DEFAULT_TTL_SECS),
        )
    }

    /// Create a cache with explicit capacity and TTL
    pub fn with_config(max_entries: u64, time_to_live: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(time_to_live)
            .build();
        Self { cache }
    }

    /// Current entry count (runs pending maintenance first)
    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

#[async_trait]
impl CacheProvider for MokaCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cache.get(key).await)
    }

    async fn set_json(&self, key: &str, value: &str, _ttl: Option<Duration>) -> Result<()> {
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let existed = self.cache.contains_key(key);
        self.cache.invalidate(key).await;
        Ok(existed)
    }

    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheProvider")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(CACHE_PROVIDERS)]
static MOKA_PROVIDER: CacheProviderEntry = CacheProviderEntry {
    name: "moka",
    description: "Moka high-performance in-memory cache",
    factory: |config| {
        let max_entries = config.max_entries.unwrap_or(CACHE_DEFAULT_MAX_ENTRIES);
        let ttl = Duration::from_secs(config.ttl_secs.unwrap_or(CACHE_DEFAULT_TTL_SECS));
        Ok(std::sync::Arc::new(MokaCacheProvider::with_config(
            max_entries,
            ttl,
        )))
    },
};
