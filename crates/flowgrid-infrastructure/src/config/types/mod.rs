//! Configuration types module

pub mod app;
pub mod cache;
pub mod database;
pub mod logging;
pub mod variables;

// Re-export main types
pub use app::*;
pub use cache::*;
pub use database::*;
pub use logging::*;
pub use variables::*;
