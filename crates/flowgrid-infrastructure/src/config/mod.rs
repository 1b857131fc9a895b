//! Configuration module
//!
//! Typed configuration sections plus a Figment-based loader that merges
//! defaults, a TOML file and `FLOWGRID_`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
