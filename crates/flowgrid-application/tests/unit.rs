//! Unit test suite for flowgrid-application
//!
//! Run with: `cargo test -p flowgrid-application --test unit`

#[path = "unit/registry_tests.rs"]
mod registry_tests;
