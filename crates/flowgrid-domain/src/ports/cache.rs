//! Cache provider port

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// Pluggable cache backend
///
/// Values are JSON strings; serialization is the caller's concern so that
/// backends stay byte-oriented and interchangeable.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    /// Get a cached JSON value
    async fn get_json(&self, key: &str) -> Result<Option<String>>;

    /// Store a JSON value with an optional per-entry TTL
    async fn set_json(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()>;

    /// Remove a key, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Drop all entries
    async fn clear(&self) -> Result<()>;

    /// Backend name for diagnostics (e.g. "moka", "null")
    fn provider_name(&self) -> &str;
}
