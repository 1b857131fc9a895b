//! In-process variable store
//!
//! Real implementation (not a mock) used by tests and standalone runs.
//! Values live in a concurrent map and are lost at process exit.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use flowgrid_application::registry::{VARIABLE_STORE_PROVIDERS, VariableStoreProviderEntry};
use flowgrid_domain::error::{Error, Result};
use flowgrid_domain::ports::VariableStoreProvider;
use flowgrid_domain::value_objects::{Variable, VariableKind};

struct StoredVariable {
    meta: Variable,
    value: String,
}

/// In-memory variable store, keyed by (user, name)
#[derive(Default)]
pub struct MemoryVariableStore {
    entries: DashMap<(Uuid, String), StoredVariable>,
}

impl MemoryVariableStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored variables across all users
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no variables
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl VariableStoreProvider for MemoryVariableStore {
    async fn create_variable(
        &self,
        user_id: Uuid,
        name: &str,
        value: &str,
        kind: VariableKind,
    ) -> Result<Variable> {
        let key = (user_id, name.to_string());
        if self.entries.contains_key(&key) {
            return Err(Error::invalid_argument(format!(
                "variable '{}' already exists",
                name
            )));
        }

        let now = Utc::now();
        let mut meta = Variable::new(user_id, name, kind);
        meta.created_at = Some(now);
        meta.updated_at = Some(now);

        self.entries.insert(
            key,
            StoredVariable {
                meta: meta.clone(),
                value: value.to_string(),
            },
        );
        Ok(meta)
    }

    async fn get_variable(&self, user_id: Uuid, name: &str) -> Result<String> {
        self.entries
            .get(&(user_id, name.to_string()))
            .map(|entry| entry.value.clone())
            .ok_or_else(|| Error::not_found(format!("variable '{}'", name)))
    }

    async fn list_variables(&self, user_id: Uuid) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| entry.key().0 == user_id)
            .map(|entry| entry.key().1.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    async fn update_variable(&self, user_id: Uuid, name: &str, value: &str) -> Result<Variable> {
        let mut entry = self
            .entries
            .get_mut(&(user_id, name.to_string()))
            .ok_or_else(|| Error::not_found(format!("variable '{}'", name)))?;

        entry.value = value.to_string();
        entry.meta.updated_at = Some(Utc::now());
        Ok(entry.meta.clone())
    }

    async fn delete_variable(&self, user_id: Uuid, name: &str) -> Result<()> {
        self.entries
            .remove(&(user_id, name.to_string()))
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("variable '{}'", name)))
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(VARIABLE_STORE_PROVIDERS)]
static MEMORY_PROVIDER: VariableStoreProviderEntry = VariableStoreProviderEntry {
    name: "memory",
    description: "In-process variable store for tests and standalone runs",
    factory: |_config| Ok(std::sync::Arc::new(MemoryVariableStore::new())),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_get_round_trip() {
        let store = MemoryVariableStore::new();
        let user = Uuid::new_v4();

        let meta = store
            .create_variable(user, "openai_key", "sk-test", VariableKind::Credential)
            .await
            .unwrap();
        assert_eq!(meta.name, "openai_key");
        assert_eq!(meta.kind, VariableKind::Credential);
        assert!(meta.created_at.is_some());

        let value = store.get_variable(user, "openai_key").await.unwrap();
        assert_eq!(value, "sk-test");
    }

    #[tokio::test]
    async fn duplicate_create_is_rejected() {
        let store = MemoryVariableStore::new();
        let user = Uuid::new_v4();

        store
            .create_variable(user, "token", "a", VariableKind::Generic)
            .await
            .unwrap();
        let err = store
            .create_variable(user, "token", "b", VariableKind::Generic)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            flowgrid_domain::Error::InvalidArgument { .. }
        ));
    }

    #[tokio::test]
    async fn list_is_scoped_to_user_and_sorted() {
        let store = MemoryVariableStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        for name in ["zeta", "alpha"] {
            store
                .create_variable(alice, name, "v", VariableKind::Generic)
                .await
                .unwrap();
        }
        store
            .create_variable(bob, "other", "v", VariableKind::Generic)
            .await
            .unwrap();

        assert_eq!(store.list_variables(alice).await.unwrap(), ["alpha", "zeta"]);
        assert_eq!(store.list_variables(bob).await.unwrap(), ["other"]);
    }

    #[tokio::test]
    async fn update_replaces_value_and_bumps_timestamp() {
        let store = MemoryVariableStore::new();
        let user = Uuid::new_v4();

        let created = store
            .create_variable(user, "token", "old", VariableKind::Generic)
            .await
            .unwrap();
        let updated = store.update_variable(user, "token", "new").await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(store.get_variable(user, "token").await.unwrap(), "new");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = MemoryVariableStore::new();
        let user = Uuid::new_v4();

        store
            .create_variable(user, "token", "v", VariableKind::Generic)
            .await
            .unwrap();
        store.delete_variable(user, "token").await.unwrap();

        assert!(store.get_variable(user, "token").await.is_err());
        assert!(store.delete_variable(user, "token").await.is_err());
    }
}
