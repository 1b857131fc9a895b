//! Cache Provider Registry
//!
//! Auto-registration system for cache backends, mirroring the variable store
//! registry: providers register via a `linkme` distributed slice and are
//! resolved by name from configuration.

use std::collections::HashMap;
use std::sync::Arc;

use flowgrid_domain::ports::CacheProvider;

/// Configuration for cache provider creation
#[derive(Debug, Clone, Default)]
pub struct CacheProviderConfig {
    /// Provider name (e.g., "moka", "null")
    pub provider: String,
    /// Maximum cache size in entries
    pub max_entries: Option<u64>,
    /// Default TTL in seconds
    pub ttl_secs: Option<u64>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl CacheProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the maximum entry count
    pub fn with_max_entries(mut self, max_entries: u64) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Set the default TTL in seconds
    pub fn with_ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = Some(ttl_secs);
        self
    }

    /// Add extra configuration
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Registry entry for cache providers
pub struct CacheProviderEntry {
    /// Unique provider name (e.g., "moka", "null")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instance
    pub factory: fn(&CacheProviderConfig) -> Result<Arc<dyn CacheProvider>, String>,
}

/// Distributed slice collecting cache provider registrations
#[linkme::distributed_slice]
pub static CACHE_PROVIDERS: [CacheProviderEntry] = [..];

/// Resolve a cache provider by name from the registry
pub fn resolve_cache_provider(
    config: &CacheProviderConfig,
) -> Result<Arc<dyn CacheProvider>, String> {
    let provider_name = &config.provider;

    for entry in CACHE_PROVIDERS.iter() {
        if entry.name == provider_name {
            tracing::debug!(provider = entry.name, "resolved cache provider");
            return (entry.factory)(config);
        }
    }

    let available: Vec<&str> = CACHE_PROVIDERS.iter().map(|e| e.name).collect();

    Err(format!(
        "Unknown cache provider '{}'. Available providers: {:?}",
        provider_name, available
    ))
}

/// List all registered cache providers
pub fn list_cache_providers() -> Vec<(&'static str, &'static str)> {
    CACHE_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
