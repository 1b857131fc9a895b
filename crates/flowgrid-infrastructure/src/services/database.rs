//! Database service
//!
//! Owns the process-wide Postgres connection pool and exposes transactional
//! session scopes. The pool is built without touching the network, so the
//! service can be constructed while the database is still unreachable;
//! connections are only opened when a scope actually runs.

use r2d2::Pool;
use r2d2_postgres::PostgresConnectionManager;
use r2d2_postgres::postgres::NoTls;
use tracing::warn;

use flowgrid_domain::error::{Error, Result};
use flowgrid_domain::ports::Service;
use flowgrid_domain::value_objects::ServiceKind;

use crate::config::DatabaseConfig;

/// Service wrapping the shared Postgres connection pool
pub struct DatabaseService {
    pool: Pool<PostgresConnectionManager<NoTls>>,
    url: String,
}

impl DatabaseService {
    /// Build the service from database configuration
    ///
    /// Fails fast on a missing or malformed URL; the first connection is
    /// opened lazily by the first session scope.
    pub fn new(config: &DatabaseConfig) -> Result<Self> {
        let url = config
            .url
            .clone()
            .ok_or_else(|| Error::configuration("database.url is not configured"))?;
        let pg_config: r2d2_postgres::postgres::Config = url
            .parse()
            .map_err(|e| Error::configuration_with_source("invalid database URL", e))?;
        let manager = PostgresConnectionManager::new(pg_config, NoTls);
        let pool = Pool::builder()
            .max_size(config.pool_size)
            .min_idle(Some(0))
            .build_unchecked(manager);
        Ok(Self { pool, url })
    }

    /// The configured connection URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Access the underlying pool
    pub fn pool(&self) -> &Pool<PostgresConnectionManager<NoTls>> {
        &self.pool
    }

    /// Run `work` inside a single database transaction
    ///
    /// The transaction is committed only when `work` returns `Ok`. On `Err`
    /// the transaction is rolled back and the error is returned to the caller
    /// unchanged. Either way the connection goes back to the pool exactly
    /// once, when the pooled connection is dropped at the end of the scope.
    pub async fn session_scope<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut r2d2_postgres::postgres::Transaction<'_>) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| Error::database_with_source("failed to acquire connection", e))?;
            let mut tx = conn
                .transaction()
                .map_err(|e| Error::database_with_source("failed to begin transaction", e))?;
            match work(&mut tx) {
                Ok(value) => {
                    tx.commit().map_err(|e| {
                        Error::database_with_source("failed to commit transaction", e)
                    })?;
                    Ok(value)
                }
                Err(err) => {
                    if let Err(rollback_err) = tx.rollback() {
                        warn!("transaction rollback failed: {}", rollback_err);
                    }
                    Err(err)
                }
            }
        })
        .await
        .map_err(|e| Error::internal(format!("database task failed: {}", e)))?
    }
}

impl Service for DatabaseService {
    fn kind(&self) -> ServiceKind {
        ServiceKind::Database
    }
}

impl std::fmt::Debug for DatabaseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseService")
            .field("max_size", &self.pool.max_size())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_requires_url() {
        let err = DatabaseService::new(&DatabaseConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn construction_rejects_malformed_url() {
        let config = DatabaseConfig {
            url: Some("not-a-url".to_string()),
            pool_size: 2,
        };
        assert!(DatabaseService::new(&config).is_err());
    }

    #[test]
    fn construction_is_offline() {
        // No server listens on this port; the pool must still build
        let config = DatabaseConfig {
            url: Some("postgres://flowgrid:pw@127.0.0.1:54329/flowgrid".to_string()),
            pool_size: 2,
        };
        let service = DatabaseService::new(&config).unwrap();
        assert_eq!(service.kind(), ServiceKind::Database);
        assert_eq!(service.pool().max_size(), 2);
    }
}
