//! # Flowgrid
//!
//! Service runtime for the backend of a visual workflow builder. Workflows
//! need a small set of process-wide services: database access with
//! transactional session scopes, a cache, and per-user variable (credential)
//! storage that can live either in the database or in Kubernetes secrets.
//!
//! This crate is the public facade: it re-exports the layer crates and
//! provides the CLI entry point.
//!
//! ## Architecture
//!
//! - `domain` - Core types, ports and errors (flowgrid-domain)
//! - `application` - Provider registries and resolution (flowgrid-application)
//! - `infrastructure` - Config, logging, DI and services (flowgrid-infrastructure)
//! - `providers` - Concrete storage and cache backends (flowgrid-providers)
//!
//! ## Example
//!
//! ```ignore
//! use flowgrid::infrastructure::di::AppContext;
//! use flowgrid::infrastructure::config::AppConfig;
//!
//! let context = AppContext::init(AppConfig::default())?;
//! let variables = context.variables()?;
//! ```

use std::path::Path;

use anyhow::Context as _;
use tracing::info;

use flowgrid_infrastructure::di::{AvailableProviders, bootstrap};

/// Domain layer re-exports
pub mod domain {
    pub use flowgrid_domain::*;
}

/// Application layer re-exports
pub mod application {
    pub use flowgrid_application::*;
}

/// Infrastructure layer re-exports
pub mod infrastructure {
    pub use flowgrid_infrastructure::*;
}

/// Provider re-exports
pub mod providers {
    pub use flowgrid_providers::*;
}

/// CLI subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Load and validate configuration, then report the selected backends
    Check,
    /// List the provider backends linked into this binary
    Providers,
}

/// CLI entry point
pub async fn run(config_path: Option<&Path>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Providers => {
            print!("{}", AvailableProviders::collect());
            Ok(())
        }
        Command::Check => check(config_path).await,
    }
}

/// Validate configuration and eagerly create the configured services
async fn check(config_path: Option<&Path>) -> anyhow::Result<()> {
    let context =
        bootstrap::init_app(config_path).context("failed to initialize application context")?;

    let cache = context.cache().context("cache service failed")?;
    info!(provider = cache.provider_name(), "cache service ready");

    let variables = context.variables().context("variable service failed")?;
    info!(backend = variables.backend_name(), "variable service ready");

    // The database service needs a URL; without one, report and move on
    if context.config().database.url.is_some() {
        let database = context.database().context("database service failed")?;
        info!(pool_size = database.pool().max_size(), "database service ready");
    } else {
        info!("database.url not configured, skipping database service");
    }

    println!(
        "configuration ok: cache={} variables={}",
        cache.provider_name(),
        variables.backend_name()
    );
    Ok(())
}
