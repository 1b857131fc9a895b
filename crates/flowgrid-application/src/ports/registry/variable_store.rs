//! Variable Store Provider Registry
//!
//! Auto-registration system for variable store backends. Providers register
//! themselves via a `linkme` distributed slice and are discovered at runtime.

use std::collections::HashMap;
use std::sync::Arc;

use flowgrid_domain::ports::VariableStoreProvider;

/// Configuration for variable store provider creation
///
/// Contains all configuration options that a variable store backend might
/// need. Providers should use what they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct VariableStoreProviderConfig {
    /// Provider name (e.g., "database", "kubernetes", "memory")
    pub provider: String,
    /// Connection URI: database URL or Kubernetes API server URL
    pub uri: Option<String>,
    /// Kubernetes namespace holding the per-user secrets
    pub namespace: Option<String>,
    /// Path to the service-account bearer token file
    pub token_path: Option<String>,
    /// Path to the cluster CA certificate bundle
    pub ca_path: Option<String>,
    /// Secret used to derive the at-rest encryption key
    pub encryption_key: Option<String>,
    /// Maximum connections for pooled backends
    pub pool_size: Option<u32>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl VariableStoreProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the connection URI
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the Kubernetes namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the service-account token path
    pub fn with_token_path(mut self, token_path: impl Into<String>) -> Self {
        self.token_path = Some(token_path.into());
        self
    }

    /// Set the cluster CA certificate path
    pub fn with_ca_path(mut self, ca_path: impl Into<String>) -> Self {
        self.ca_path = Some(ca_path.into());
        self
    }

    /// Set the encryption key
    pub fn with_encryption_key(mut self, key: impl Into<String>) -> Self {
        self.encryption_key = Some(key.into());
        self
    }

    /// Set the pool size
    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = Some(pool_size);
        self
    }

    /// Add extra configuration
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Registry entry for variable store providers
///
/// Each backend registers itself with this entry via
/// `#[linkme::distributed_slice(VARIABLE_STORE_PROVIDERS)]`. The entry
/// contains metadata and a factory function to create provider instances.
pub struct VariableStoreProviderEntry {
    /// Unique provider name (e.g., "database", "kubernetes", "memory")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instance
    pub factory:
        fn(&VariableStoreProviderConfig) -> Result<Arc<dyn VariableStoreProvider>, String>,
}

/// Distributed slice collecting variable store provider registrations
#[linkme::distributed_slice]
pub static VARIABLE_STORE_PROVIDERS: [VariableStoreProviderEntry] = [..];

/// Resolve a variable store provider by name from the registry
///
/// Searches the registry for a provider matching the configured name and
/// creates an instance using the provider's factory function.
pub fn resolve_variable_store_provider(
    config: &VariableStoreProviderConfig,
) -> Result<Arc<dyn VariableStoreProvider>, String> {
    let provider_name = &config.provider;

    for entry in VARIABLE_STORE_PROVIDERS.iter() {
        if entry.name == provider_name {
            tracing::debug!(provider = entry.name, "resolved variable store provider");
            return (entry.factory)(config);
        }
    }

    // List available providers for helpful error message
    let available: Vec<&str> = VARIABLE_STORE_PROVIDERS.iter().map(|e| e.name).collect();

    Err(format!(
        "Unknown variable store provider '{}'. Available providers: {:?}",
        provider_name, available
    ))
}

/// List all registered variable store providers
///
/// Returns a list of (name, description) tuples. Useful for CLI help and
/// configuration validation.
pub fn list_variable_store_providers() -> Vec<(&'static str, &'static str)> {
    VARIABLE_STORE_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = VariableStoreProviderConfig::new("kubernetes")
            .with_uri("https://kubernetes.default.svc")
            .with_namespace("flowgrid")
            .with_token_path("/var/run/secrets/kubernetes.io/serviceaccount/token")
            .with_extra("field-manager", "flowgrid");

        assert_eq!(config.provider, "kubernetes");
        assert_eq!(
            config.uri,
            Some("https://kubernetes.default.svc".to_string())
        );
        assert_eq!(config.namespace, Some("flowgrid".to_string()));
        assert_eq!(
            config.extra.get("field-manager"),
            Some(&"flowgrid".to_string())
        );
    }

    #[test]
    fn test_database_config_builder() {
        let config = VariableStoreProviderConfig::new("database")
            .with_uri("postgres://localhost:5432/flowgrid")
            .with_encryption_key("super-secret")
            .with_pool_size(4);

        assert_eq!(config.provider, "database");
        assert_eq!(config.pool_size, Some(4));
        assert_eq!(config.encryption_key, Some("super-secret".to_string()));
    }
}
