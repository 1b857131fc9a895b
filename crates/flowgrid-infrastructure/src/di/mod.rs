//! Dependency injection and composition root
//!
//! The registry stores process-wide services keyed by [`ServiceKind`] and
//! creates them lazily through registered factories:
//!
//! ```text
//! AppContext::init(config)
//!   ├── registers DatabaseServiceFactory
//!   ├── registers CacheServiceFactory
//!   └── registers VariableServiceFactory
//!         └── first get(ServiceKind::Variable) picks the backend:
//!               store == "kubernetes"  -> Kubernetes secret store
//!               anything else          -> database store (with a warning
//!                                         for unrecognized values)
//! ```
//!
//! Services are singletons: the factory runs at most once per kind and the
//! created instance is cached. Asking for a kind with no registered factory
//! is an error, never a silent re-registration.
//!
//! [`ServiceKind`]: flowgrid_domain::value_objects::ServiceKind

pub mod bootstrap;
pub mod catalog;
pub mod factories;
pub mod registry;

pub use bootstrap::AppContext;
pub use catalog::AvailableProviders;
pub use factories::{
    CacheServiceFactory, DatabaseServiceFactory, ServiceFactory, VariableServiceFactory,
};
pub use registry::ServiceRegistry;
