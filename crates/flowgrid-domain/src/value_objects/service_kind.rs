//! Service kind registry keys
//!
//! Closed set of identifiers for the process-wide services managed by the
//! service registry. Adding a service means adding a variant here and a
//! factory in the infrastructure layer; there is no string-keyed lookup.

use serde::{Deserialize, Serialize};

/// Identifier for a registered process-wide service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    /// Shared database access (connection pool + transaction scope)
    Database,
    /// Shared cache
    Cache,
    /// User credential ("variable") storage
    Variable,
}

impl ServiceKind {
    /// Stable string form, used in logs and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "database_service",
            Self::Cache => "cache_service",
            Self::Variable => "variable_service",
        }
    }

    /// All known service kinds, in deterministic registration order
    pub fn all() -> &'static [ServiceKind] {
        &[Self::Database, Self::Cache, Self::Variable]
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_as_str() {
        for kind in ServiceKind::all() {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn all_kinds_are_distinct() {
        let kinds = ServiceKind::all();
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }
}
