//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by domain concern.

mod apps;
mod env_vars;

use std::time::Duration;

use envvars_core::{
    App, ENV_PG_ACQUIRE_TIMEOUT_SECS, ENV_PG_IDLE_TIMEOUT_SECS, ENV_PG_MAX_CONNECTIONS,
    EnvironmentVariable, PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS,
    PG_POOL_MAX_CONNECTIONS, env_parse_with_default,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::error::StorageError;
use crate::pg_migrations::run_pg_migrations;

pub(crate) const APP_COLUMNS: &str = "id, name, created";
pub(crate) const ENV_VAR_COLUMNS: &str = "id, created, updated, key, value, owner_id";

/// Connection pool sizing, overridable through `ENVVARS_PG_*` variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PgPoolConfig {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for PgPoolConfig {
    fn default() -> Self {
        Self {
            max_connections: PG_POOL_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS),
            idle_timeout: Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS),
        }
    }
}

impl PgPoolConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            max_connections: env_parse_with_default(
                ENV_PG_MAX_CONNECTIONS,
                PG_POOL_MAX_CONNECTIONS,
            ),
            acquire_timeout: Duration::from_secs(env_parse_with_default(
                ENV_PG_ACQUIRE_TIMEOUT_SECS,
                PG_POOL_ACQUIRE_TIMEOUT_SECS,
            )),
            idle_timeout: Duration::from_secs(env_parse_with_default(
                ENV_PG_IDLE_TIMEOUT_SECS,
                PG_POOL_IDLE_TIMEOUT_SECS,
            )),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Connect and bring the schema up to date.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let storage = Self::connect(database_url, PgPoolConfig::from_env()).await?;
        storage.migrate().await?;
        tracing::info!("PgStorage initialized");
        Ok(storage)
    }

    /// Connect without touching the schema.
    pub async fn connect(database_url: &str, config: PgPoolConfig) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        tracing::debug!(max_connections = config.max_connections, "PostgreSQL pool connected");
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), StorageError> {
        run_pg_migrations(&self.pool).await.map_err(|e| StorageError::Migration(e.to_string()))
    }

    /// Round-trip a trivial query; used by readiness checks.
    pub async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

pub(crate) fn row_to_app(row: &PgRow) -> Result<App, StorageError> {
    Ok(App { id: row.try_get("id")?, name: row.try_get("name")?, created: row.try_get("created")? })
}

pub(crate) fn row_to_env_var(row: &PgRow) -> Result<EnvironmentVariable, StorageError> {
    Ok(EnvironmentVariable {
        id: row.try_get("id")?,
        created: row.try_get("created")?,
        updated: row.try_get("updated")?,
        key: row.try_get("key")?,
        value: row.try_get("value")?,
        owner: row.try_get("owner_id")?,
    })
}
