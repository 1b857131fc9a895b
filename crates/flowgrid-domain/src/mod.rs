//! Flowgrid domain layer
//!
//! Core types shared by every other crate in the workspace: the error type,
//! value objects (service kinds, variables) and the port traits implemented
//! by providers and infrastructure services.
//!
//! This crate is dependency-light on purpose: no IO, no runtime, no config.

pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
