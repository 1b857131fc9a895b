//! Variable store configuration types

use crate::constants::{DEFAULT_KUBERNETES_NAMESPACE, DEFAULT_VARIABLE_STORE};
use serde::{Deserialize, Serialize};

/// Variable store configuration
///
/// The `store` field selects the backend by name. "kubernetes" selects the
/// Secret-backed store; any other value falls back to the database store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VariablesConfig {
    /// Backend selector ("database" or "kubernetes")
    pub store: String,

    /// Secret used to derive the at-rest encryption key (database backend)
    pub encryption_key: Option<String>,

    /// Kubernetes backend settings
    pub kubernetes: KubernetesConfig,
}

impl Default for VariablesConfig {
    fn default() -> Self {
        Self {
            store: DEFAULT_VARIABLE_STORE.to_string(),
            encryption_key: None,
            kubernetes: KubernetesConfig::default(),
        }
    }
}

/// Kubernetes variable store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KubernetesConfig {
    /// API server URL; defaults to the in-cluster service address
    pub api_url: Option<String>,

    /// Namespace holding the per-user variable secrets
    pub namespace: String,

    /// Path to the service-account bearer token file
    pub token_path: Option<String>,

    /// Path to the cluster CA certificate bundle
    pub ca_path: Option<String>,
}

impl Default for KubernetesConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            namespace: DEFAULT_KUBERNETES_NAMESPACE.to_string(),
            token_path: None,
            ca_path: None,
        }
    }
}
