//! Variable store provider port

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::value_objects::{Variable, VariableKind};

/// Pluggable backend for per-user variable (credential) storage
///
/// Implementations register themselves in the variable-store provider
/// registry and are selected by the `variables.store` configuration value.
#[async_trait]
pub trait VariableStoreProvider: Send + Sync {
    /// Store a new variable. Fails with `Error::InvalidArgument` if a
    /// variable with the same name already exists for the user.
    async fn create_variable(
        &self,
        user_id: Uuid,
        name: &str,
        value: &str,
        kind: VariableKind,
    ) -> Result<Variable>;

    /// Fetch the decrypted value of a variable
    async fn get_variable(&self, user_id: Uuid, name: &str) -> Result<String>;

    /// List the names of all variables owned by the user
    async fn list_variables(&self, user_id: Uuid) -> Result<Vec<String>>;

    /// Replace the value of an existing variable
    async fn update_variable(&self, user_id: Uuid, name: &str, value: &str) -> Result<Variable>;

    /// Remove a variable
    async fn delete_variable(&self, user_id: Uuid, name: &str) -> Result<()>;

    /// Backend name for diagnostics (e.g. "database", "kubernetes")
    fn provider_name(&self) -> &str;
}
