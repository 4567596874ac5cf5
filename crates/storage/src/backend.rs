//! Unified storage backend with enum dispatch.

use async_trait::async_trait;
use envvars_core::{App, EnvironmentVariable};
use uuid::Uuid;

use crate::error::StorageError;
use crate::memory::MemoryStorage;
use crate::pg_storage::PgStorage;
use crate::traits::{AppStore, EnvVarStore};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Postgres(s) => <PgStorage as $trait>::$method(s, $($arg),*).await,
            StorageBackend::Memory(s) => <MemoryStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    Postgres(PgStorage),
    Memory(MemoryStorage),
}

impl StorageBackend {
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(PgStorage::new(database_url).await?))
    }

    #[must_use]
    pub fn new_memory() -> Self {
        Self::Memory(MemoryStorage::new())
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    /// Verify the backend can serve queries.
    pub async fn ping(&self) -> Result<(), StorageError> {
        match self {
            Self::Postgres(s) => s.ping().await,
            Self::Memory(_) => Ok(()),
        }
    }
}

// ── AppStore ─────────────────────────────────────────────────────

#[async_trait]
impl AppStore for StorageBackend {
    async fn create_app(&self, name: &str) -> Result<App, StorageError> {
        dispatch!(self, AppStore, create_app(name))
    }

    async fn get_app(&self, id: Uuid) -> Result<App, StorageError> {
        dispatch!(self, AppStore, get_app(id))
    }

    async fn get_app_by_name(&self, name: &str) -> Result<App, StorageError> {
        dispatch!(self, AppStore, get_app_by_name(name))
    }

    async fn list_apps(&self) -> Result<Vec<App>, StorageError> {
        dispatch!(self, AppStore, list_apps())
    }

    async fn delete_app(&self, id: Uuid) -> Result<u64, StorageError> {
        dispatch!(self, AppStore, delete_app(id))
    }
}

// ── EnvVarStore ──────────────────────────────────────────────────

#[async_trait]
impl EnvVarStore for StorageBackend {
    async fn create_env_var(
        &self,
        owner: Uuid,
        key: &str,
        value: &str,
    ) -> Result<EnvironmentVariable, StorageError> {
        dispatch!(self, EnvVarStore, create_env_var(owner, key, value))
    }

    async fn update_env_var(
        &self,
        owner: Uuid,
        key: &str,
        value: &str,
    ) -> Result<EnvironmentVariable, StorageError> {
        dispatch!(self, EnvVarStore, update_env_var(owner, key, value))
    }

    async fn get_env_var(
        &self,
        owner: Uuid,
        key: &str,
    ) -> Result<EnvironmentVariable, StorageError> {
        dispatch!(self, EnvVarStore, get_env_var(owner, key))
    }

    async fn list_env_vars(&self, owner: Uuid) -> Result<Vec<EnvironmentVariable>, StorageError> {
        dispatch!(self, EnvVarStore, list_env_vars(owner))
    }

    async fn delete_env_var(&self, owner: Uuid, key: &str) -> Result<(), StorageError> {
        dispatch!(self, EnvVarStore, delete_env_var(owner, key))
    }

    async fn delete_env_vars_by_owner(&self, owner: Uuid) -> Result<u64, StorageError> {
        dispatch!(self, EnvVarStore, delete_env_vars_by_owner(owner))
    }
}
