//! Cache backends
//!
//! - `moka`: in-process concurrent cache (the default)
//! - `null`: no-op cache for tests and cache-disabled runs

pub mod moka;
pub mod null;

pub use moka::MokaCacheProvider;
pub use null::NullCacheProvider;
