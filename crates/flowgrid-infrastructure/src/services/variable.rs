//! Variable service
//!
//! Registry-facing wrapper around the selected variable store backend. The
//! backend (database or kubernetes) is chosen by the variable service
//! factory; this type only delegates.

use std::sync::Arc;

use uuid::Uuid;

use flowgrid_domain::error::Result;
use flowgrid_domain::ports::{Service, VariableStoreProvider};
use flowgrid_domain::value_objects::{ServiceKind, Variable, VariableKind};

/// Service wrapping the configured variable store backend
pub struct VariableService {
    store: Arc<dyn VariableStoreProvider>,
}

impl VariableService {
    /// Wrap a variable store provider
    pub fn new(store: Arc<dyn VariableStoreProvider>) -> Self {
        Self { store }
    }

    /// Name of the underlying backend ("database", "kubernetes", ...)
    pub fn backend_name(&self) -> &str {
        self.store.provider_name()
    }

    /// Create a variable for a user
    pub async fn create_variable(
        &self,
        user_id: Uuid,
        name: &str,
        value: &str,
        kind: VariableKind,
    ) -> Result<Variable> {
        self.store.create_variable(user_id, name, value, kind).await
    }

    /// Fetch the decrypted value of a variable
    pub async fn get_variable(&self, user_id: Uuid, name: &str) -> Result<String> {
        self.store.get_variable(user_id, name).await
    }

    /// List the names of a user's variables
    pub async fn list_variables(&self, user_id: Uuid) -> Result<Vec<String>> {
        self.store.list_variables(user_id).await
    }

    /// Replace the value of an existing variable
    pub async fn update_variable(&self, user_id: Uuid, name: &str, value: &str) -> Result<Variable> {
        self.store.update_variable(user_id, name, value).await
    }

    /// Delete a variable
    pub async fn delete_variable(&self, user_id: Uuid, name: &str) -> Result<()> {
        self.store.delete_variable(user_id, name).await
    }
}

impl Service for VariableService {
    fn kind(&self) -> ServiceKind {
        ServiceKind::Variable
    }
}

impl std::fmt::Debug for VariableService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariableService")
            .field("backend", &self.store.provider_name())
            .finish()
    }
}
