//! Shared constants for envvars.
//!
//! Column widths mirror the persisted schema; pool settings are the defaults
//! used when the matching `ENVVARS_PG_*` variables are unset.

/// Maximum length of an environment variable key, in characters.
pub const MAX_KEY_LENGTH: usize = 100;

/// Maximum length of an environment variable value, in characters.
pub const MAX_VALUE_LENGTH: usize = 1000;

/// Maximum length of an app name, in characters.
pub const MAX_APP_NAME_LENGTH: usize = 100;

/// Name of the composite unique index on `(owner_id, key)`.
pub const ENVVAR_UNIQUE_CONSTRAINT: &str = "envvar_is_unique";

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Env var overriding [`PG_POOL_MAX_CONNECTIONS`].
pub const ENV_PG_MAX_CONNECTIONS: &str = "ENVVARS_PG_MAX_CONNECTIONS";

/// Env var overriding [`PG_POOL_ACQUIRE_TIMEOUT_SECS`].
pub const ENV_PG_ACQUIRE_TIMEOUT_SECS: &str = "ENVVARS_PG_ACQUIRE_TIMEOUT_SECS";

/// Env var overriding [`PG_POOL_IDLE_TIMEOUT_SECS`].
pub const ENV_PG_IDLE_TIMEOUT_SECS: &str = "ENVVARS_PG_IDLE_TIMEOUT_SECS";
