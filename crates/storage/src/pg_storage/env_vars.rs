//! EnvVarStore implementation for PgStorage.

use async_trait::async_trait;
use envvars_core::EnvironmentVariable;
use uuid::Uuid;

use super::{ENV_VAR_COLUMNS, PgStorage, row_to_env_var};
use crate::error::StorageError;
use crate::traits::EnvVarStore;

#[async_trait]
impl EnvVarStore for PgStorage {
    async fn create_env_var(
        &self,
        owner: Uuid,
        key: &str,
        value: &str,
    ) -> Result<EnvironmentVariable, StorageError> {
        let var = EnvironmentVariable::new(owner, key, value);
        // Uniqueness is left to envvar_is_unique so concurrent creates race safely.
        sqlx::query(&format!(
            "INSERT INTO environment_variables ({ENV_VAR_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6)"
        ))
        .bind(var.id)
        .bind(var.created)
        .bind(var.updated)
        .bind(&var.key)
        .bind(&var.value)
        .bind(var.owner)
        .execute(&self.pool)
        .await
        .map_err(|e| match StorageError::from(e) {
            StorageError::Conflict(_) => {
                StorageError::Conflict(format!("key '{key}' already exists for app {owner}"))
            },
            StorageError::NotFound { .. } => StorageError::app_not_found(owner),
            other => other,
        })?;
        tracing::debug!(app_id = %owner, key, "environment variable created");
        Ok(var)
    }

    async fn update_env_var(
        &self,
        owner: Uuid,
        key: &str,
        value: &str,
    ) -> Result<EnvironmentVariable, StorageError> {
        let row = sqlx::query(&format!(
            "UPDATE environment_variables
             SET value = $3,
                 updated = GREATEST(clock_timestamp(), updated + INTERVAL '1 microsecond')
             WHERE owner_id = $1 AND key = $2
             RETURNING {ENV_VAR_COLUMNS}"
        ))
        .bind(owner)
        .bind(key)
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;
        let var = row
            .map(|r| row_to_env_var(&r))
            .transpose()?
            .ok_or_else(|| StorageError::env_var_not_found(owner, key))?;
        tracing::debug!(app_id = %owner, key, "environment variable updated");
        Ok(var)
    }

    async fn get_env_var(
        &self,
        owner: Uuid,
        key: &str,
    ) -> Result<EnvironmentVariable, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {ENV_VAR_COLUMNS} FROM environment_variables WHERE owner_id = $1 AND key = $2"
        ))
        .bind(owner)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_env_var(&r))
            .transpose()?
            .ok_or_else(|| StorageError::env_var_not_found(owner, key))
    }

    async fn list_env_vars(&self, owner: Uuid) -> Result<Vec<EnvironmentVariable>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {ENV_VAR_COLUMNS} FROM environment_variables WHERE owner_id = $1 ORDER BY key"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_env_var).collect()
    }

    async fn delete_env_var(&self, owner: Uuid, key: &str) -> Result<(), StorageError> {
        let result =
            sqlx::query("DELETE FROM environment_variables WHERE owner_id = $1 AND key = $2")
                .bind(owner)
                .bind(key)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::env_var_not_found(owner, key));
        }
        tracing::debug!(app_id = %owner, key, "environment variable deleted");
        Ok(())
    }

    async fn delete_env_vars_by_owner(&self, owner: Uuid) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM environment_variables WHERE owner_id = $1")
            .bind(owner)
            .execute(&self.pool)
            .await?;
        let deleted = result.rows_affected();
        tracing::info!(app_id = %owner, deleted, "environment variables cascaded");
        Ok(deleted)
    }
}
