use async_trait::async_trait;
use envvars_core::EnvironmentVariable;
use uuid::Uuid;

use crate::error::StorageError;

/// Owner-scoped key/value operations.
///
/// Implementations enforce `(owner, key)` uniqueness themselves; callers
/// never pre-check before `create_env_var`.
#[async_trait]
pub trait EnvVarStore: Send + Sync {
    /// Insert a new variable. `Conflict` if `(owner, key)` exists,
    /// `NotFound` if the owner does not.
    async fn create_env_var(
        &self,
        owner: Uuid,
        key: &str,
        value: &str,
    ) -> Result<EnvironmentVariable, StorageError>;

    /// Replace the value of an existing variable; `updated` strictly increases.
    async fn update_env_var(
        &self,
        owner: Uuid,
        key: &str,
        value: &str,
    ) -> Result<EnvironmentVariable, StorageError>;

    async fn get_env_var(&self, owner: Uuid, key: &str)
    -> Result<EnvironmentVariable, StorageError>;

    /// All variables of an owner, ordered by key.
    async fn list_env_vars(&self, owner: Uuid) -> Result<Vec<EnvironmentVariable>, StorageError>;

    /// Delete one variable. `NotFound` if absent.
    async fn delete_env_var(&self, owner: Uuid, key: &str) -> Result<(), StorageError>;

    /// Delete every variable of an owner atomically. Returns the count removed.
    async fn delete_env_vars_by_owner(&self, owner: Uuid) -> Result<u64, StorageError>;
}
