//! Service registry
//!
//! Stores process-wide singleton services keyed by [`ServiceKind`] and
//! creates them lazily through registered factories. The registry lock is
//! never held while a factory runs, so factories may resolve other services
//! from the registry without deadlocking.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use flowgrid_domain::error::{Error, Result};
use flowgrid_domain::ports::Service;
use flowgrid_domain::value_objects::ServiceKind;

use crate::config::AppConfig;
use crate::di::factories::ServiceFactory;

#[derive(Default)]
struct RegistryState {
    factories: HashMap<ServiceKind, Arc<dyn ServiceFactory>>,
    instances: HashMap<ServiceKind, Arc<dyn Service>>,
}

/// Lazily-instantiating service registry
///
/// Each [`ServiceKind`] maps to at most one factory and at most one service
/// instance. `get` returns the cached instance or runs the factory exactly
/// once; concurrent first calls race to create, the first insert wins and
/// the losers receive the winning instance.
pub struct ServiceRegistry {
    config: AppConfig,
    state: Mutex<RegistryState>,
}

impl ServiceRegistry {
    /// Create an empty registry for the given configuration
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            state: Mutex::new(RegistryState::default()),
        }
    }

    /// The configuration services are created from
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn lock(&self) -> Result<MutexGuard<'_, RegistryState>> {
        self.state
            .lock()
            .map_err(|_| Error::internal("service registry lock poisoned"))
    }

    /// Register a factory for its service kind
    ///
    /// Registering a second factory for the same kind is a wiring mistake
    /// and is rejected.
    pub fn register_factory(&self, factory: Arc<dyn ServiceFactory>) -> Result<()> {
        let kind = factory.kind();
        let mut state = self.lock()?;
        if state.factories.contains_key(&kind) {
            return Err(Error::invalid_argument(format!(
                "factory already registered for {}",
                kind
            )));
        }
        state.factories.insert(kind, factory);
        Ok(())
    }

    /// Register an already-built service instance
    pub fn register_service(&self, service: Arc<dyn Service>) -> Result<()> {
        let kind = service.kind();
        let mut state = self.lock()?;
        if state.instances.contains_key(&kind) {
            return Err(Error::invalid_argument(format!(
                "service already registered for {}",
                kind
            )));
        }
        state.instances.insert(kind, service);
        Ok(())
    }

    /// Whether a factory or instance exists for the kind
    pub fn contains(&self, kind: ServiceKind) -> Result<bool> {
        let state = self.lock()?;
        Ok(state.instances.contains_key(&kind) || state.factories.contains_key(&kind))
    }

    /// Kinds with a registered factory or instance, in declaration order
    pub fn registered_kinds(&self) -> Result<Vec<ServiceKind>> {
        let state = self.lock()?;
        Ok(ServiceKind::all()
            .iter()
            .copied()
            .filter(|kind| {
                state.instances.contains_key(kind) || state.factories.contains_key(kind)
            })
            .collect())
    }

    /// Get the service for a kind, creating it on first access
    ///
    /// Fails with [`Error::ServiceNotFound`] when neither an instance nor a
    /// factory is registered for the kind.
    pub fn get(&self, kind: ServiceKind) -> Result<Arc<dyn Service>> {
        let factory = {
            let state = self.lock()?;
            if let Some(service) = state.instances.get(&kind) {
                return Ok(service.clone());
            }
            state
                .factories
                .get(&kind)
                .cloned()
                .ok_or(Error::ServiceNotFound { kind })?
        };

        // Lock released: the factory may call back into the registry
        let service = factory.create(self, &self.config)?;

        let mut state = self.lock()?;
        Ok(state.instances.entry(kind).or_insert(service).clone())
    }

    /// Get the service for a kind, registering `default` first if the kind
    /// has no factory or instance yet
    pub fn get_with_default(
        &self,
        kind: ServiceKind,
        default: Arc<dyn ServiceFactory>,
    ) -> Result<Arc<dyn Service>> {
        {
            let mut state = self.lock()?;
            if !state.instances.contains_key(&kind) && !state.factories.contains_key(&kind) {
                state.factories.insert(kind, default);
            }
        }
        self.get(kind)
    }

    /// Get the service for a kind downcast to its concrete type
    pub fn get_as<S: Service>(&self, kind: ServiceKind) -> Result<Arc<S>> {
        self.get(kind)?.downcast_arc::<S>().map_err(|_| {
            Error::internal(format!("service registered for {} has unexpected type", kind))
        })
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds = self.registered_kinds().unwrap_or_default();
        f.debug_struct("ServiceRegistry")
            .field("registered", &kinds)
            .finish_non_exhaustive()
    }
}
