//! Flowgrid infrastructure layer
//!
//! Cross-cutting technical concerns: configuration loading, logging setup,
//! the service registry / composition root and the concrete process-wide
//! services (database, cache, variables).

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;
pub mod services;
