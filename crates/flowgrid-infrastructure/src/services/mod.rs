//! Process-wide services managed by the registry
//!
//! Each service wraps a provider (or a connection pool) behind the
//! [`Service`](flowgrid_domain::ports::Service) trait so the registry can
//! store it and hand out typed references.

pub mod cache;
pub mod database;
pub mod variable;

pub use cache::CacheService;
pub use database::DatabaseService;
pub use variable::VariableService;
