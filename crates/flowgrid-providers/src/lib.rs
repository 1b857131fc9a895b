//! Flowgrid provider implementations
//!
//! Pluggable backends for the variable store and cache registries declared in
//! `flowgrid-application`. Each provider self-registers via a `linkme`
//! distributed slice; linking this crate is what populates the registries
//! (binaries and integration tests use `extern crate flowgrid_providers` to
//! force the link).

pub mod cache;
pub mod constants;
pub mod variable_store;

pub use cache::{MokaCacheProvider, NullCacheProvider};
pub use variable_store::{DatabaseVariableStore, KubernetesVariableStore, MemoryVariableStore};
