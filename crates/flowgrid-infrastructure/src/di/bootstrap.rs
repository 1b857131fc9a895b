//! Application bootstrap
//!
//! Builds the composition root: loads configuration, initializes logging and
//! wires the service factories into a fresh registry. Services themselves
//! are created lazily on first access.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use flowgrid_domain::error::Result;
use flowgrid_domain::value_objects::ServiceKind;

use crate::config::{AppConfig, ConfigLoader};
use crate::di::factories::{
    CacheServiceFactory, DatabaseServiceFactory, ServiceFactory, VariableServiceFactory,
};
use crate::di::registry::ServiceRegistry;
use crate::logging::init_logging;
use crate::services::{CacheService, DatabaseService, VariableService};

/// Application context holding the configured service registry
///
/// This is the composition root: everything downstream receives services
/// from here instead of constructing them.
pub struct AppContext {
    registry: Arc<ServiceRegistry>,
}

impl AppContext {
    /// Build a context from configuration, registering all service factories
    ///
    /// Factories are registered in deterministic order (database, cache,
    /// variables); creation stays lazy.
    pub fn init(config: AppConfig) -> Result<Self> {
        let registry = Arc::new(ServiceRegistry::new(config));

        let factories: Vec<Arc<dyn ServiceFactory>> = vec![
            Arc::new(DatabaseServiceFactory),
            Arc::new(CacheServiceFactory),
            Arc::new(VariableServiceFactory),
        ];
        for factory in factories {
            registry.register_factory(factory)?;
        }

        info!(
            services = ?registry.registered_kinds()?,
            "application context initialized"
        );
        Ok(Self { registry })
    }

    /// The service registry
    pub fn registry(&self) -> &Arc<ServiceRegistry> {
        &self.registry
    }

    /// The loaded configuration
    pub fn config(&self) -> &AppConfig {
        self.registry.config()
    }

    /// The shared database service
    pub fn database(&self) -> Result<Arc<DatabaseService>> {
        self.registry.get_as(ServiceKind::Database)
    }

    /// The shared cache service
    pub fn cache(&self) -> Result<Arc<CacheService>> {
        self.registry.get_as(ServiceKind::Cache)
    }

    /// The variable service
    pub fn variables(&self) -> Result<Arc<VariableService>> {
        self.registry.get_as(ServiceKind::Variable)
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("registry", &self.registry)
            .finish()
    }
}

/// Load configuration, initialize logging and build the application context
///
/// This is the entry point binaries use. `config_path` overrides the default
/// configuration file search.
pub fn init_app(config_path: Option<&Path>) -> Result<AppContext> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = config_path {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;
    init_logging(config.logging.clone())?;
    AppContext::init(config)
}
