//! User variables (stored credentials and plain values)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classification of a stored variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    /// Plain configuration value
    Generic,
    /// Secret (API key, token). Treated as write-only in listings.
    Credential,
}

impl VariableKind {
    /// Stable string form, used as the storage discriminator
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Credential => "credential",
        }
    }

    /// Parse the storage discriminator back into a kind
    ///
    /// Unknown discriminators map to `Credential` so that values written by a
    /// newer version are never exposed as plain text by an older one.
    pub fn parse(s: &str) -> Self {
        match s {
            "generic" => Self::Generic,
            _ => Self::Credential,
        }
    }
}

impl std::fmt::Display for VariableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for a stored variable
///
/// The decrypted value is never part of this struct; it is only returned by
/// `VariableStoreProvider::get_variable`, so accidental `Debug`/serde output
/// of a `Variable` cannot leak a secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    /// Unique id of the variable row/entry
    pub id: Uuid,
    /// Owner of the variable
    pub user_id: Uuid,
    /// Name, unique per owner
    pub name: String,
    /// Classification
    pub kind: VariableKind,
    /// Creation timestamp, when the backend tracks one
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp, when the backend tracks one
    pub updated_at: Option<DateTime<Utc>>,
}

impl Variable {
    /// Create variable metadata with a fresh id and no timestamps
    pub fn new(user_id: Uuid, name: impl Into<String>, kind: VariableKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            kind,
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_discriminator_defaults_to_credential() {
        assert_eq!(VariableKind::parse("generic"), VariableKind::Generic);
        assert_eq!(VariableKind::parse("credential"), VariableKind::Credential);
        assert_eq!(VariableKind::parse("whatever"), VariableKind::Credential);
    }

    #[test]
    fn new_variable_gets_unique_ids() {
        let user = Uuid::new_v4();
        let a = Variable::new(user, "openai_key", VariableKind::Credential);
        let b = Variable::new(user, "openai_key", VariableKind::Credential);
        assert_ne!(a.id, b.id);
        assert_eq!(a.user_id, b.user_id);
    }
}
