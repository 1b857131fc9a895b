//! Flowgrid application layer
//!
//! Declares the provider registries that backend implementations register
//! into at link time. Resolution (config value → provider instance) happens
//! here; the concrete providers live in `flowgrid-providers` and the wiring
//! into services lives in `flowgrid-infrastructure`.

pub mod ports;

pub use ports::registry;
