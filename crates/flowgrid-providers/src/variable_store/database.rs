//! Database-backed variable store
//!
//! Stores per-user variables as rows in the `variable` table, with values
//! encrypted at rest. The connection pool is built lazily: constructing the
//! store never touches the network, connections are established on first use.
//!
//! The sync Postgres driver is driven through `spawn_blocking` so the store
//! is safe to call from async contexts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use postgres::error::SqlState;
use r2d2::Pool;
use r2d2_postgres::{PostgresConnectionManager, postgres::NoTls};
use uuid::Uuid;

use flowgrid_application::registry::{VARIABLE_STORE_PROVIDERS, VariableStoreProviderEntry};
use flowgrid_domain::error::{Error, Result};
use flowgrid_domain::ports::VariableStoreProvider;
use flowgrid_domain::value_objects::{Variable, VariableKind};

use super::cipher::ValueCipher;
use crate::constants::{VARIABLE_DB_DEFAULT_POOL_SIZE, VARIABLE_TABLE};

type PgPool = Pool<PostgresConnectionManager<NoTls>>;
type PgConn = r2d2::PooledConnection<PostgresConnectionManager<NoTls>>;

/// Postgres-backed variable store (the default backend)
pub struct DatabaseVariableStore {
    pool: PgPool,
    cipher: ValueCipher,
}

impl DatabaseVariableStore {
    /// Build the store from registry configuration
    ///
    /// Requires `uri` (a Postgres connection URL) and `encryption_key`.
    pub fn from_config(
        config: &flowgrid_application::registry::VariableStoreProviderConfig,
    ) -> std::result::Result<Self, String> {
        let uri = config
            .uri
            .as_deref()
            .ok_or_else(|| "database variable store requires a connection URI".to_string())?;
        let key = config.encryption_key.as_deref().ok_or_else(|| {
            "database variable store requires an encryption key (variables.encryption_key)"
                .to_string()
        })?;

        let pg_config = uri
            .parse::<postgres::Config>()
            .map_err(|e| format!("invalid database URI: {}", e))?;
        let manager = PostgresConnectionManager::new(pg_config, NoTls);

        // build_unchecked defers connection establishment to first checkout
        let pool = Pool::builder()
            .max_size(config.pool_size.unwrap_or(VARIABLE_DB_DEFAULT_POOL_SIZE))
            .min_idle(Some(0))
            .build_unchecked(manager);

        Ok(Self {
            pool,
            cipher: ValueCipher::from_secret(key),
        })
    }

    /// Run a closure on a pooled connection from a blocking thread
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut PgConn) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| Error::database_with_source("failed to check out connection", e))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| Error::internal(format!("database task panicked: {}", e)))?
    }

    fn ensure_schema(conn: &mut PgConn) -> Result<()> {
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {VARIABLE_TABLE} (
                id UUID PRIMARY KEY,
                user_id UUID NOT NULL,
                name TEXT NOT NULL,
                kind TEXT NOT NULL,
                value TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                UNIQUE (user_id, name)
            )"
        );
        conn.batch_execute(&ddl)
            .map_err(|e| Error::database_with_source("failed to ensure variable table", e))
    }
}

#[async_trait]
impl VariableStoreProvider for DatabaseVariableStore {
    async fn create_variable(
        &self,
        user_id: Uuid,
        name: &str,
        value: &str,
        kind: VariableKind,
    ) -> Result<Variable> {
        let encrypted = self.cipher.encrypt(value)?;
        let id = Uuid::new_v4();
        let name = name.to_string();

        self.with_conn(move |conn| {
            Self::ensure_schema(conn)?;
            let sql = format!(
                "INSERT INTO {VARIABLE_TABLE} (id, user_id, name, kind, value)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING created_at, updated_at"
            );
            let row = conn
                .query_one(sql.as_str(), &[&id, &user_id, &name, &kind.as_str(), &encrypted])
                .map_err(|e| {
                    if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                        Error::invalid_argument(format!("variable '{}' already exists", name))
                    } else {
                        Error::database_with_source("failed to insert variable", e)
                    }
                })?;

            let created_at: DateTime<Utc> = row.get(0);
            let updated_at: DateTime<Utc> = row.get(1);
            Ok(Variable {
                id,
                user_id,
                name,
                kind,
                created_at: Some(created_at),
                updated_at: Some(updated_at),
            })
        })
        .await
    }

    async fn get_variable(&self, user_id: Uuid, name: &str) -> Result<String> {
        let lookup = name.to_string();
        let encrypted = self
            .with_conn(move |conn| {
                let sql =
                    format!("SELECT value FROM {VARIABLE_TABLE} WHERE user_id = $1 AND name = $2");
                conn.query_opt(sql.as_str(), &[&user_id, &lookup])
                    .map_err(|e| Error::database_with_source("failed to load variable", e))?
                .map(|row| row.get::<_, String>(0))
                .ok_or_else(|| Error::not_found(format!("variable '{}'", lookup)))
            })
            .await?;

        self.cipher.decrypt(&encrypted)
    }

    async fn list_variables(&self, user_id: Uuid) -> Result<Vec<String>> {
        self.with_conn(move |conn| {
            let sql = format!("SELECT name FROM {VARIABLE_TABLE} WHERE user_id = $1 ORDER BY name");
            let rows = conn
                .query(sql.as_str(), &[&user_id])
                .map_err(|e| Error::database_with_source("failed to list variables", e))?;
            Ok(rows.iter().map(|row| row.get(0)).collect())
        })
        .await
    }

    async fn update_variable(&self, user_id: Uuid, name: &str, value: &str) -> Result<Variable> {
        let encrypted = self.cipher.encrypt(value)?;
        let name = name.to_string();

        self.with_conn(move |conn| {
            let sql = format!(
                "UPDATE {VARIABLE_TABLE}
                 SET value = $3, updated_at = now()
                 WHERE user_id = $1 AND name = $2
                 RETURNING id, kind, created_at, updated_at"
            );
            let row = conn
                .query_opt(sql.as_str(), &[&user_id, &name, &encrypted])
                .map_err(|e| Error::database_with_source("failed to update variable", e))?
                .ok_or_else(|| Error::not_found(format!("variable '{}'", name)))?;

            Ok(Variable {
                id: row.get(0),
                user_id,
                name,
                kind: VariableKind::parse(row.get(1)),
                created_at: Some(row.get(2)),
                updated_at: Some(row.get(3)),
            })
        })
        .await
    }

    async fn delete_variable(&self, user_id: Uuid, name: &str) -> Result<()> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let sql = format!("DELETE FROM {VARIABLE_TABLE} WHERE user_id = $1 AND name = $2");
            let deleted = conn
                .execute(sql.as_str(), &[&user_id, &name])
                .map_err(|e| Error::database_with_source("failed to delete variable", e))?;
            if deleted == 0 {
                return Err(Error::not_found(format!("variable '{}'", name)));
            }
            Ok(())
        })
        .await
    }

    fn provider_name(&self) -> &str {
        "database"
    }
}

impl std::fmt::Debug for DatabaseVariableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseVariableStore")
            .field("pool_max_size", &self.pool.max_size())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(VARIABLE_STORE_PROVIDERS)]
static DATABASE_PROVIDER: VariableStoreProviderEntry = VariableStoreProviderEntry {
    name: "database",
    description: "Postgres-backed variable store with at-rest encryption",
    factory: |config| Ok(std::sync::Arc::new(DatabaseVariableStore::from_config(config)?)),
};

#[cfg(test)]
mod tests {
    use super::*;
    use flowgrid_application::registry::VariableStoreProviderConfig;

    #[test]
    fn from_config_requires_uri_and_key() {
        let missing_uri = VariableStoreProviderConfig::new("database");
        assert!(DatabaseVariableStore::from_config(&missing_uri).is_err());

        let missing_key = VariableStoreProviderConfig::new("database")
            .with_uri("postgres://localhost:5432/flowgrid");
        assert!(DatabaseVariableStore::from_config(&missing_key).is_err());
    }

    #[test]
    fn from_config_is_offline() {
        // No server is listening on this port; construction must still work.
        let config = VariableStoreProviderConfig::new("database")
            .with_uri("postgres://127.0.0.1:1/flowgrid")
            .with_encryption_key("test-key")
            .with_pool_size(2);

        let store = DatabaseVariableStore::from_config(&config).unwrap();
        assert_eq!(store.provider_name(), "database");
    }

    #[test]
    fn rejects_malformed_uri() {
        let config = VariableStoreProviderConfig::new("database")
            .with_uri("not a url")
            .with_encryption_key("test-key");
        assert!(DatabaseVariableStore::from_config(&config).is_err());
    }
}
