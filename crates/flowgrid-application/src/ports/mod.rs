//! Application-layer ports

pub mod registry;
