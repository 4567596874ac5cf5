//! In-memory storage backend.
//!
//! Both tables sit behind one `RwLock`, so uniqueness checks and cascades
//! happen under a single write guard exactly as a transaction would.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use envvars_core::{App, EnvironmentVariable};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StorageError;
use crate::traits::{AppStore, EnvVarStore};

#[derive(Debug, Default)]
struct Tables {
    apps: HashMap<Uuid, App>,
    // Keyed like envvar_is_unique; ordering gives per-owner ranges sorted by key.
    env_vars: BTreeMap<(Uuid, String), EnvironmentVariable>,
}

impl Tables {
    fn owner_keys(&self, owner: Uuid) -> Vec<(Uuid, String)> {
        self.env_vars
            .range((owner, String::new())..)
            .take_while(|((o, _), _)| *o == owner)
            .map(|(k, _)| k.clone())
            .collect()
    }

    fn remove_owner(&mut self, owner: Uuid) -> u64 {
        let keys = self.owner_keys(owner);
        for k in &keys {
            self.env_vars.remove(k);
        }
        u64::try_from(keys.len()).unwrap_or(u64::MAX)
    }
}

/// Ephemeral store with the same semantics as [`crate::PgStorage`].
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppStore for MemoryStorage {
    async fn create_app(&self, name: &str) -> Result<App, StorageError> {
        let mut tables = self.tables.write().await;
        if tables.apps.values().any(|a| a.name == name) {
            return Err(StorageError::Conflict(format!("app '{name}' already exists")));
        }
        let app = App::new(name);
        tables.apps.insert(app.id, app.clone());
        tracing::info!(app_id = %app.id, name = %app.name, "app created");
        Ok(app)
    }

    async fn get_app(&self, id: Uuid) -> Result<App, StorageError> {
        let tables = self.tables.read().await;
        tables.apps.get(&id).cloned().ok_or_else(|| StorageError::app_not_found(id))
    }

    async fn get_app_by_name(&self, name: &str) -> Result<App, StorageError> {
        let tables = self.tables.read().await;
        tables
            .apps
            .values()
            .find(|a| a.name == name)
            .cloned()
            .ok_or_else(|| StorageError::app_not_found(name))
    }

    async fn list_apps(&self) -> Result<Vec<App>, StorageError> {
        let tables = self.tables.read().await;
        let mut apps: Vec<App> = tables.apps.values().cloned().collect();
        apps.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(apps)
    }

    async fn delete_app(&self, id: Uuid) -> Result<u64, StorageError> {
        let mut tables = self.tables.write().await;
        if tables.apps.remove(&id).is_none() {
            return Err(StorageError::app_not_found(id));
        }
        let vars = tables.remove_owner(id);
        tracing::info!(app_id = %id, deleted_variables = vars, "app deleted");
        Ok(vars)
    }
}

#[async_trait]
impl EnvVarStore for MemoryStorage {
    async fn create_env_var(
        &self,
        owner: Uuid,
        key: &str,
        value: &str,
    ) -> Result<EnvironmentVariable, StorageError> {
        let mut tables = self.tables.write().await;
        if !tables.apps.contains_key(&owner) {
            return Err(StorageError::app_not_found(owner));
        }
        let slot = (owner, key.to_owned());
        if tables.env_vars.contains_key(&slot) {
            return Err(StorageError::Conflict(format!(
                "key '{key}' already exists for app {owner}"
            )));
        }
        let var = EnvironmentVariable::new(owner, key, value);
        tables.env_vars.insert(slot, var.clone());
        tracing::debug!(app_id = %owner, key, "environment variable created");
        Ok(var)
    }

    async fn update_env_var(
        &self,
        owner: Uuid,
        key: &str,
        value: &str,
    ) -> Result<EnvironmentVariable, StorageError> {
        let mut tables = self.tables.write().await;
        let var = tables
            .env_vars
            .get_mut(&(owner, key.to_owned()))
            .ok_or_else(|| StorageError::env_var_not_found(owner, key))?;
        var.set_value(value);
        tracing::debug!(app_id = %owner, key, "environment variable updated");
        Ok(var.clone())
    }

    async fn get_env_var(
        &self,
        owner: Uuid,
        key: &str,
    ) -> Result<EnvironmentVariable, StorageError> {
        let tables = self.tables.read().await;
        tables
            .env_vars
            .get(&(owner, key.to_owned()))
            .cloned()
            .ok_or_else(|| StorageError::env_var_not_found(owner, key))
    }

    async fn list_env_vars(&self, owner: Uuid) -> Result<Vec<EnvironmentVariable>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .env_vars
            .range((owner, String::new())..)
            .take_while(|((o, _), _)| *o == owner)
            .map(|(_, v)| v.clone())
            .collect())
    }

    async fn delete_env_var(&self, owner: Uuid, key: &str) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        tables
            .env_vars
            .remove(&(owner, key.to_owned()))
            .ok_or_else(|| StorageError::env_var_not_found(owner, key))?;
        tracing::debug!(app_id = %owner, key, "environment variable deleted");
        Ok(())
    }

    async fn delete_env_vars_by_owner(&self, owner: Uuid) -> Result<u64, StorageError> {
        let mut tables = self.tables.write().await;
        let deleted = tables.remove_owner(owner);
        tracing::info!(app_id = %owner, deleted, "environment variables cascaded");
        Ok(deleted)
    }
}
