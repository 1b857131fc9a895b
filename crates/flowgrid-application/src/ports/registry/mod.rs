//! Provider Registry System
//!
//! Auto-registration infrastructure for pluggable backends. Uses the
//! `linkme` crate for compile-time registration of providers that are
//! discovered and instantiated at runtime from configuration.
//!
//! ## Architecture
//!
//! ```text
//! 1. Provider defines:  #[linkme::distributed_slice(VARIABLE_STORE_PROVIDERS)]
//!                       static ENTRY: VariableStoreProviderEntry = ...
//!                             ↓
//! 2. Registry declares: #[linkme::distributed_slice]
//!                       pub static VARIABLE_STORE_PROVIDERS: [Entry] = [..]
//!                             ↓
//! 3. Resolver queries:  VARIABLE_STORE_PROVIDERS.iter()
//!                             ↓
//! 4. Config selects:    variables.store = "kubernetes" → KubernetesVariableStore
//! ```
//!
//! ## Registering a provider (in flowgrid-providers)
//!
//! ```ignore
//! use flowgrid_application::registry::{VariableStoreProviderEntry, VARIABLE_STORE_PROVIDERS};
//!
//! #[linkme::distributed_slice(VARIABLE_STORE_PROVIDERS)]
//! static MEMORY_PROVIDER: VariableStoreProviderEntry = VariableStoreProviderEntry {
//!     name: "memory",
//!     description: "In-process variable store",
//!     factory: |config| Ok(Arc::new(MemoryVariableStore::from_config(config)?)),
//! };
//! ```

pub mod cache;
pub mod variable_store;

// Re-export all registry types and functions
pub use cache::{
    CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry, list_cache_providers,
    resolve_cache_provider,
};
pub use variable_store::{
    VARIABLE_STORE_PROVIDERS, VariableStoreProviderConfig, VariableStoreProviderEntry,
    list_variable_store_providers, resolve_variable_store_provider,
};
