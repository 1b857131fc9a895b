//! Infrastructure constants

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "FLOWGRID";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "flowgrid.toml";

/// Default configuration directory name (under the platform config dir)
pub const DEFAULT_CONFIG_DIR: &str = "flowgrid";

/// Default log level when nothing else is configured
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default database connection pool size
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;

/// Default cache provider name
pub const DEFAULT_CACHE_PROVIDER: &str = "moka";

/// Default maximum cache entries
pub const CACHE_DEFAULT_MAX_ENTRIES: u64 = 10_000;

/// Default cache TTL in seconds
pub const CACHE_DEFAULT_TTL_SECS: u64 = 3_600;

/// Default variable store backend
pub const DEFAULT_VARIABLE_STORE: &str = "database";

/// Default Kubernetes namespace for variable secrets
pub const DEFAULT_KUBERNETES_NAMESPACE: &str = "default";
