//! Null cache provider
//!
//! Real no-op implementation (not a mock): stores nothing, returns nothing.
//! Used in tests and when caching is disabled.

use std::time::Duration;

use async_trait::async_trait;

use flowgrid_application::registry::{CACHE_PROVIDERS, CacheProviderEntry};
use flowgrid_domain::error::Result;
use flowgrid_domain::ports::CacheProvider;

/// Cache that never caches
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCacheProvider;

impl NullCacheProvider {
    /// Create a new null cache
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheProvider for NullCacheProvider {
    async fn get_json(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set_json(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(CACHE_PROVIDERS)]
static NULL_PROVIDER: CacheProviderEntry = CacheProviderEntry {
    name: "null",
    description: "No-op cache for tests and cache-disabled runs",
    factory: |_config| Ok(std::sync::Arc::new(NullCacheProvider::new())),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn never_stores_anything() {
        let cache = NullCacheProvider::new();
        cache.set_json("k", "v", None).await.unwrap();
        assert_eq!(cache.get_json("k").await.unwrap(), None);
        assert!(!cache.delete("k").await.unwrap());
    }
}
