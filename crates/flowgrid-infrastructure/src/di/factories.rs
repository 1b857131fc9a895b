//! Service factories
//!
//! One factory per [`ServiceKind`]. Factories are registered at bootstrap
//! and run lazily on first `get` for their kind. The variable service
//! factory is the interesting one: it selects the storage backend from
//! `variables.store` and resolves it through the provider registry.

use std::sync::Arc;

use tracing::{info, warn};

use flowgrid_application::registry::{
    CacheProviderConfig, VariableStoreProviderConfig, resolve_cache_provider,
    resolve_variable_store_provider,
};
use flowgrid_domain::error::{Error, Result};
use flowgrid_domain::ports::Service;
use flowgrid_domain::value_objects::ServiceKind;

use crate::config::AppConfig;
use crate::di::registry::ServiceRegistry;
use crate::services::{CacheService, DatabaseService, VariableService};

/// Variable store backend selected by `variables.store == "kubernetes"`
pub const VARIABLE_BACKEND_KUBERNETES: &str = "kubernetes";

/// Variable store backend used for every other `variables.store` value
pub const VARIABLE_BACKEND_DATABASE: &str = "database";

/// Creates a service for its kind on first registry access
pub trait ServiceFactory: Send + Sync {
    /// The service kind this factory produces
    fn kind(&self) -> ServiceKind;

    /// Build the service
    ///
    /// Runs with the registry lock released, so implementations may resolve
    /// other services from `registry`.
    fn create(&self, registry: &ServiceRegistry, config: &AppConfig) -> Result<Arc<dyn Service>>;
}

/// Factory for the shared database service
#[derive(Debug, Default)]
pub struct DatabaseServiceFactory;

impl ServiceFactory for DatabaseServiceFactory {
    fn kind(&self) -> ServiceKind {
        ServiceKind::Database
    }

    fn create(&self, _registry: &ServiceRegistry, config: &AppConfig) -> Result<Arc<dyn Service>> {
        let service = DatabaseService::new(&config.database)?;
        info!(pool_size = config.database.pool_size, "database service created");
        Ok(Arc::new(service))
    }
}

/// Factory for the shared cache service
#[derive(Debug, Default)]
pub struct CacheServiceFactory;

impl ServiceFactory for CacheServiceFactory {
    fn kind(&self) -> ServiceKind {
        ServiceKind::Cache
    }

    fn create(&self, _registry: &ServiceRegistry, config: &AppConfig) -> Result<Arc<dyn Service>> {
        let provider_config = CacheProviderConfig::new(&config.cache.provider)
            .with_max_entries(config.cache.max_entries)
            .with_ttl_secs(config.cache.default_ttl_secs);
        let provider = resolve_cache_provider(&provider_config).map_err(Error::configuration)?;
        info!(provider = provider.provider_name(), "cache service created");
        Ok(Arc::new(CacheService::new(provider)))
    }
}

/// Factory for the variable service
///
/// Picks the storage backend from configuration: `"kubernetes"` selects the
/// Secret-backed store, every other value (including the default) selects
/// the database store. Unrecognized values are logged and fall back rather
/// than failing, so a typo in `variables.store` degrades to the safe
/// default instead of taking the whole application down.
#[derive(Debug, Default)]
pub struct VariableServiceFactory;

impl VariableServiceFactory {
    /// Resolve the backend name for a `variables.store` value
    pub fn select_backend(store: &str) -> &'static str {
        match store {
            VARIABLE_BACKEND_KUBERNETES => VARIABLE_BACKEND_KUBERNETES,
            VARIABLE_BACKEND_DATABASE => VARIABLE_BACKEND_DATABASE,
            other => {
                warn!(
                    store = other,
                    "unrecognized variable store, falling back to database backend"
                );
                VARIABLE_BACKEND_DATABASE
            }
        }
    }

    fn provider_config(config: &AppConfig) -> VariableStoreProviderConfig {
        let backend = Self::select_backend(&config.variables.store);
        let mut provider_config = VariableStoreProviderConfig::new(backend);

        if backend == VARIABLE_BACKEND_KUBERNETES {
            let k8s = &config.variables.kubernetes;
            provider_config = provider_config.with_namespace(&k8s.namespace);
            if let Some(api_url) = &k8s.api_url {
                provider_config = provider_config.with_uri(api_url);
            }
            if let Some(token_path) = &k8s.token_path {
                provider_config = provider_config.with_token_path(token_path);
            }
            if let Some(ca_path) = &k8s.ca_path {
                provider_config = provider_config.with_ca_path(ca_path);
            }
        } else {
            if let Some(url) = &config.database.url {
                provider_config = provider_config.with_uri(url);
            }
            if let Some(key) = &config.variables.encryption_key {
                provider_config = provider_config.with_encryption_key(key);
            }
            provider_config = provider_config.with_pool_size(config.database.pool_size);
        }

        provider_config
    }
}

impl ServiceFactory for VariableServiceFactory {
    fn kind(&self) -> ServiceKind {
        ServiceKind::Variable
    }

    fn create(&self, _registry: &ServiceRegistry, config: &AppConfig) -> Result<Arc<dyn Service>> {
        let provider_config = Self::provider_config(config);
        let store =
            resolve_variable_store_provider(&provider_config).map_err(Error::configuration)?;
        info!(backend = store.provider_name(), "variable service created");
        Ok(Arc::new(VariableService::new(store)))
    }
}

#[cfg(test)]
mod tests {
    // Real providers, registered through linkme by linking the crate
    extern crate flowgrid_providers;

    use super::*;

    fn database_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.url = Some("postgres://flowgrid:pw@127.0.0.1:54329/flowgrid".to_string());
        config.variables.encryption_key = Some("unit-test-key".to_string());
        config
    }

    #[test]
    fn backend_selection_prefers_kubernetes_only_on_exact_match() {
        assert_eq!(
            VariableServiceFactory::select_backend("kubernetes"),
            "kubernetes"
        );
        assert_eq!(
            VariableServiceFactory::select_backend("database"),
            "database"
        );
        // Unrecognized and empty values fall back to the database backend
        assert_eq!(VariableServiceFactory::select_backend("redis"), "database");
        assert_eq!(
            VariableServiceFactory::select_backend("Kubernetes"),
            "database"
        );
        assert_eq!(VariableServiceFactory::select_backend(""), "database");
    }

    #[test]
    fn variable_factory_builds_database_backend() {
        let registry = ServiceRegistry::new(database_config());
        let service = VariableServiceFactory
            .create(&registry, registry.config())
            .unwrap();
        let service = service.downcast_arc::<VariableService>().unwrap();
        assert_eq!(service.backend_name(), "database");
    }

    #[test]
    fn variable_factory_builds_kubernetes_backend() {
        let mut config = AppConfig::default();
        config.variables.store = "kubernetes".to_string();
        config.variables.kubernetes.namespace = "workflows".to_string();

        let registry = ServiceRegistry::new(config);
        let service = VariableServiceFactory
            .create(&registry, registry.config())
            .unwrap();
        let service = service.downcast_arc::<VariableService>().unwrap();
        assert_eq!(service.backend_name(), "kubernetes");
    }

    #[test]
    fn variable_factory_falls_back_to_database_for_unknown_store() {
        let mut config = database_config();
        config.variables.store = "redis".to_string();

        let registry = ServiceRegistry::new(config);
        let service = VariableServiceFactory
            .create(&registry, registry.config())
            .unwrap();
        let service = service.downcast_arc::<VariableService>().unwrap();
        assert_eq!(service.backend_name(), "database");
    }

    #[test]
    fn database_backend_requires_encryption_key() {
        let mut config = database_config();
        config.variables.encryption_key = None;

        let registry = ServiceRegistry::new(config);
        let err = VariableServiceFactory
            .create(&registry, registry.config())
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn cache_factory_resolves_configured_provider() {
        let registry = ServiceRegistry::new(AppConfig::default());
        let service = CacheServiceFactory
            .create(&registry, registry.config())
            .unwrap();
        let service = service.downcast_arc::<CacheService>().unwrap();
        assert_eq!(service.provider_name(), "moka");
    }

    #[test]
    fn cache_factory_rejects_unknown_provider() {
        let mut config = AppConfig::default();
        config.cache.provider = "memcached".to_string();

        let registry = ServiceRegistry::new(config);
        let err = CacheServiceFactory
            .create(&registry, registry.config())
            .unwrap_err();
        assert!(err.to_string().contains("Available providers"));
    }

    #[test]
    fn database_factory_requires_url() {
        let registry = ServiceRegistry::new(AppConfig::default());
        let err = DatabaseServiceFactory
            .create(&registry, registry.config())
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }
}
