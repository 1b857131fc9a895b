//! Port traits
//!
//! Seams between the layers: `Service` is what the registry stores,
//! the provider traits are what the pluggable backends implement.

pub mod cache;
pub mod service;
pub mod variable_store;

pub use cache::CacheProvider;
pub use service::Service;
pub use variable_store::VariableStoreProvider;
