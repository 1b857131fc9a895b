//! Cache service
//!
//! Thin registry-facing wrapper around the configured cache provider.

use std::sync::Arc;
use std::time::Duration;

use flowgrid_domain::error::Result;
use flowgrid_domain::ports::{CacheProvider, Service};
use flowgrid_domain::value_objects::ServiceKind;

/// Service wrapping the configured cache backend
pub struct CacheService {
    provider: Arc<dyn CacheProvider>,
}

impl CacheService {
    /// Wrap a cache provider
    pub fn new(provider: Arc<dyn CacheProvider>) -> Self {
        Self { provider }
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Fetch a cached JSON value
    pub async fn get_json(&self, key: &str) -> Result<Option<String>> {
        self.provider.get_json(key).await
    }

    /// Store a JSON value with an optional per-entry TTL
    pub async fn set_json(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        self.provider.set_json(key, value, ttl).await
    }

    /// Remove a cached value, returning whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool> {
        self.provider.delete(key).await
    }

    /// Drop all cached values
    pub async fn clear(&self) -> Result<()> {
        self.provider.clear().await
    }
}

impl Service for CacheService {
    fn kind(&self) -> ServiceKind {
        ServiceKind::Cache
    }
}

impl std::fmt::Debug for CacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheService")
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}
