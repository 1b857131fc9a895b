//! Kubernetes-Secret-backed variable store
//!
//! Keeps one `Secret` per user (`flowgrid-vars-<user-id>`) in the configured
//! namespace and talks to the cluster REST API directly with `reqwest`. The
//! service-account bearer token is read lazily per request, so construction
//! never performs IO and token rotation is picked up automatically.
//!
//! Variable kinds are not persisted by this backend; everything read back is
//! treated as a credential.

use std::path::PathBuf;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use flowgrid_application::registry::{
    VARIABLE_STORE_PROVIDERS, VariableStoreProviderConfig, VariableStoreProviderEntry,
};
use flowgrid_domain::error::{Error, Result};
use flowgrid_domain::ports::VariableStoreProvider;
use flowgrid_domain::value_objects::{Variable, VariableKind};

use crate::constants::{
    KUBERNETES_DEFAULT_API_URL, KUBERNETES_DEFAULT_TOKEN_PATH, KUBERNETES_SECRET_PREFIX,
};

const MERGE_PATCH: &str = "application/merge-patch+json";

/// Longest API error body quoted in an error message, in bytes
const ERROR_BODY_LIMIT: usize = 200;

/// Variable store backed by per-user Kubernetes secrets
pub struct KubernetesVariableStore {
    client: Client,
    api_url: String,
    namespace: String,
    token_path: PathBuf,
}

impl KubernetesVariableStore {
    /// Build the store from registry configuration
    pub fn from_config(
        config: &VariableStoreProviderConfig,
    ) -> std::result::Result<Self, String> {
        let mut builder = Client::builder();
        if let Some(ca_path) = &config.ca_path {
            let pem = std::fs::read(ca_path)
                .map_err(|e| format!("failed to read cluster CA bundle {}: {}", ca_path, e))?;
            let cert = reqwest::Certificate::from_pem(&pem)
                .map_err(|e| format!("invalid cluster CA bundle {}: {}", ca_path, e))?;
            builder = builder.add_root_certificate(cert);
        }
        let client = builder
            .build()
            .map_err(|e| format!("failed to build Kubernetes HTTP client: {}", e))?;

        Ok(Self {
            client,
            api_url: config
                .uri
                .clone()
                .unwrap_or_else(|| KUBERNETES_DEFAULT_API_URL.to_string()),
            namespace: config
                .namespace
                .clone()
                .unwrap_or_else(|| "default".to_string()),
            token_path: PathBuf::from(
                config
                    .token_path
                    .clone()
                    .unwrap_or_else(|| KUBERNETES_DEFAULT_TOKEN_PATH.to_string()),
            ),
        })
    }

    /// Name of the secret holding the user's variables
    pub fn secret_name(user_id: Uuid) -> String {
        format!("{}-{}", KUBERNETES_SECRET_PREFIX, user_id)
    }

    /// Manifest used when the per-user secret does not exist yet
    fn secret_manifest(user_id: Uuid, name: &str, value: &str) -> Value {
        json!({
            "apiVersion": "v1",
            "kind": "Secret",
            "metadata": {
                "name": Self::secret_name(user_id),
                "labels": { "app.kubernetes.io/managed-by": "flowgrid" },
            },
            "stringData": { name: value },
        })
    }

    fn secrets_url(&self) -> String {
        format!(
            "{}/api/v1/namespaces/{}/secrets",
            self.api_url, self.namespace
        )
    }

    fn secret_url(&self, user_id: Uuid) -> String {
        format!("{}/{}", self.secrets_url(), Self::secret_name(user_id))
    }

    async fn bearer(&self) -> Result<String> {
        let token = tokio::fs::read_to_string(&self.token_path)
            .await
            .map_err(|e| {
                Error::configuration_with_source(
                    format!(
                        "failed to read service-account token {}",
                        self.token_path.display()
                    ),
                    e,
                )
            })?;
        Ok(token.trim().to_string())
    }

    /// Fetch the per-user secret, mapping 404 to `None`
    async fn fetch_secret(&self, user_id: Uuid) -> Result<Option<Value>> {
        let token = self.bearer().await?;
        let response = self
            .client
            .get(self.secret_url(user_id))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::network_with_source("Kubernetes API request failed", e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check_status("fetch secret", response).await?;
        let body = response
            .json::<Value>()
            .await
            .map_err(|e| Error::network_with_source("invalid Kubernetes API response", e))?;
        Ok(Some(body))
    }

    /// Merge-patch the per-user secret
    async fn patch_secret(&self, user_id: Uuid, patch: Value) -> Result<()> {
        let token = self.bearer().await?;
        let response = self
            .client
            .patch(self.secret_url(user_id))
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, MERGE_PATCH)
            .json(&patch)
            .send()
            .await
            .map_err(|e| Error::network_with_source("Kubernetes API request failed", e))?;
        Self::check_status("patch secret", response).await?;
        Ok(())
    }

    async fn create_secret(&self, user_id: Uuid, name: &str, value: &str) -> Result<()> {
        tracing::debug!(%user_id, namespace = %self.namespace, "creating variable secret");
        let token = self.bearer().await?;
        let response = self
            .client
            .post(self.secrets_url())
            .bearer_auth(token)
            .json(&Self::secret_manifest(user_id, name, value))
            .send()
            .await
            .map_err(|e| Error::network_with_source("Kubernetes API request failed", e))?;
        Self::check_status("create secret", response).await?;
        Ok(())
    }

    async fn check_status(context: &str, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = Self::clip_body(response.text().await.unwrap_or_default());
        Err(Error::network(format!(
            "{}: Kubernetes API returned {}: {}",
            context, status, body
        )))
    }

    /// Clip an error body for quoting, never splitting a UTF-8 character
    ///
    /// Status messages from the API server are free to contain non-ASCII
    /// text, so the cut point has to land on a char boundary.
    fn clip_body(mut body: String) -> String {
        let mut end = body.len().min(ERROR_BODY_LIMIT);
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
        body
    }

    /// Decode one entry from the secret's base64 `data` map
    fn decode_entry(data: &Value, name: &str) -> Result<String> {
        let encoded = data
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::not_found(format!("variable '{}'", name)))?;
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| Error::crypto(format!("invalid secret data encoding: {}", e)))?;
        String::from_utf8(bytes).map_err(Error::from)
    }

    fn data<'a>(secret: &'a Value) -> Option<&'a Value> {
        secret.get("data").filter(|d| d.is_object())
    }
}

#[async_trait]
impl VariableStoreProvider for KubernetesVariableStore {
    async fn create_variable(
        &self,
        user_id: Uuid,
        name: &str,
        value: &str,
        kind: VariableKind,
    ) -> Result<Variable> {
        match self.fetch_secret(user_id).await? {
            None => self.create_secret(user_id, name, value).await?,
            Some(secret) => {
                if Self::data(&secret).is_some_and(|d| d.get(name).is_some()) {
                    return Err(Error::invalid_argument(format!(
                        "variable '{}' already exists",
                        name
                    )));
                }
                self.patch_secret(user_id, json!({ "stringData": { name: value } }))
                    .await?;
            }
        }
        Ok(Variable::new(user_id, name, kind))
    }

    async fn get_variable(&self, user_id: Uuid, name: &str) -> Result<String> {
        let secret = self
            .fetch_secret(user_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("variable '{}'", name)))?;
        let data = Self::data(&secret)
            .ok_or_else(|| Error::not_found(format!("variable '{}'", name)))?;
        Self::decode_entry(data, name)
    }

    async fn list_variables(&self, user_id: Uuid) -> Result<Vec<String>> {
        let Some(secret) = self.fetch_secret(user_id).await? else {
            return Ok(Vec::new());
        };
        let mut names: Vec<String> = Self::data(&secret)
            .and_then(Value::as_object)
            .map(|data| data.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        Ok(names)
    }

    async fn update_variable(&self, user_id: Uuid, name: &str, value: &str) -> Result<Variable> {
        let secret = self
            .fetch_secret(user_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("variable '{}'", name)))?;
        if !Self::data(&secret).is_some_and(|d| d.get(name).is_some()) {
            return Err(Error::not_found(format!("variable '{}'", name)));
        }
        self.patch_secret(user_id, json!({ "stringData": { name: value } }))
            .await?;
        Ok(Variable::new(user_id, name, VariableKind::Credential))
    }

    async fn delete_variable(&self, user_id: Uuid, name: &str) -> Result<()> {
        let secret = self
            .fetch_secret(user_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("variable '{}'", name)))?;
        if !Self::data(&secret).is_some_and(|d| d.get(name).is_some()) {
            return Err(Error::not_found(format!("variable '{}'", name)));
        }
        // A JSON merge patch with an explicit null removes the key
        self.patch_secret(user_id, json!({ "data": { name: Value::Null } }))
            .await
    }

    fn provider_name(&self) -> &str {
        "kubernetes"
    }
}

impl std::fmt::Debug for KubernetesVariableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubernetesVariableStore")
            .field("api_url", &self.api_url)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(VARIABLE_STORE_PROVIDERS)]
static KUBERNETES_PROVIDER: VariableStoreProviderEntry = VariableStoreProviderEntry {
    name: "kubernetes",
    description: "Kubernetes-Secret-backed variable store (one secret per user)",
    factory: |config| {
        Ok(std::sync::Arc::new(KubernetesVariableStore::from_config(
            config,
        )?))
    },
};
