//! Provider-level constants

/// Default connection pool size for the database variable store
pub const VARIABLE_DB_DEFAULT_POOL_SIZE: u32 = 4;

/// Table holding encrypted user variables
pub const VARIABLE_TABLE: &str = "variable";

/// AES-256-GCM key size in bytes
pub const AES_GCM_KEY_SIZE: usize = 32;

/// AES-GCM nonce size in bytes
pub const AES_GCM_NONCE_SIZE: usize = 12;

/// In-cluster Kubernetes API server address
pub const KUBERNETES_DEFAULT_API_URL: &str = "https://kubernetes.default.svc";

/// In-cluster service-account token location
pub const KUBERNETES_DEFAULT_TOKEN_PATH: &str =
    "/var/run/secrets/kubernetes.io/serviceaccount/token";

/// Prefix of the per-user secret holding variables
pub const KUBERNETES_SECRET_PREFIX: &str = "flowgrid-vars";

/// Default cache capacity in entries
pub const CACHE_DEFAULT_MAX_ENTRIES: u64 = 10_000;

/// Default cache TTL in seconds
pub const CACHE_DEFAULT_TTL_SECS: u64 = 3_600;
