//! Provider catalog
//!
//! Read-only view over the linkme provider registries, used by the CLI and
//! by configuration validation to tell users what backends this build
//! actually carries.

use flowgrid_application::registry::{list_cache_providers, list_variable_store_providers};

/// Names and descriptions of every provider linked into this binary
#[derive(Debug, Clone)]
pub struct AvailableProviders {
    /// Variable store backends (name, description)
    pub variable_stores: Vec<(&'static str, &'static str)>,
    /// Cache backends (name, description)
    pub caches: Vec<(&'static str, &'static str)>,
}

impl AvailableProviders {
    /// Collect the registered providers from the linkme registries
    pub fn collect() -> Self {
        let mut variable_stores = list_variable_store_providers();
        variable_stores.sort_by_key(|(name, _)| *name);
        let mut caches = list_cache_providers();
        caches.sort_by_key(|(name, _)| *name);
        Self {
            variable_stores,
            caches,
        }
    }

    /// Whether a variable store backend with this name is linked in
    pub fn has_variable_store(&self, name: &str) -> bool {
        self.variable_stores.iter().any(|(n, _)| *n == name)
    }

    /// Whether a cache backend with this name is linked in
    pub fn has_cache(&self, name: &str) -> bool {
        self.caches.iter().any(|(n, _)| *n == name)
    }
}

impl std::fmt::Display for AvailableProviders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "variable stores:")?;
        for (name, description) in &self.variable_stores {
            writeln!(f, "  {:<12} {}", name, description)?;
        }
        writeln!(f, "caches:")?;
        for (name, description) in &self.caches {
            writeln!(f, "  {:<12} {}", name, description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Real providers, registered through linkme by linking the crate
    extern crate flowgrid_providers;

    use super::*;

    #[test]
    fn collect_sees_linked_providers() {
        let providers = AvailableProviders::collect();
        assert!(providers.has_variable_store("database"));
        assert!(providers.has_variable_store("kubernetes"));
        assert!(providers.has_variable_store("memory"));
        assert!(providers.has_cache("moka"));
        assert!(providers.has_cache("null"));
    }

    #[test]
    fn display_lists_every_backend() {
        let rendered = AvailableProviders::collect().to_string();
        assert!(rendered.contains("variable stores:"));
        assert!(rendered.contains("kubernetes"));
        assert!(rendered.contains("moka"));
    }
}
