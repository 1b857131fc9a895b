//! Variable store backends
//!
//! Three implementations of the `VariableStoreProvider` port:
//!
//! - `database`: encrypted rows in a Postgres table (the default)
//! - `kubernetes`: one Kubernetes `Secret` per user
//! - `memory`: in-process map for tests and standalone runs

mod cipher;
pub mod database;
pub mod kubernetes;
pub mod memory;

pub use database::DatabaseVariableStore;
pub use kubernetes::KubernetesVariableStore;
pub use memory::MemoryVariableStore;
