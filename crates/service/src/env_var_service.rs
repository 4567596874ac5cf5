use std::sync::Arc;

use envvars_core::{EnvironmentVariable, render_dotenv, validate_key, validate_value};
use envvars_storage::traits::{AppStore, EnvVarStore};
use envvars_storage::{StorageBackend, StorageError};
use uuid::Uuid;

use crate::ServiceError;

/// Result of a create-or-update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upserted {
    pub variable: EnvironmentVariable,
    pub created: bool,
}

pub struct EnvVarService {
    storage: Arc<StorageBackend>,
}

impl EnvVarService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    pub async fn create(
        &self,
        owner: Uuid,
        key: &str,
        value: &str,
    ) -> Result<EnvironmentVariable, ServiceError> {
        validate_key(key)?;
        validate_value(value)?;
        Ok(self.storage.create_env_var(owner, key, value).await?)
    }

    pub async fn update(
        &self,
        owner: Uuid,
        key: &str,
        value: &str,
    ) -> Result<EnvironmentVariable, ServiceError> {
        validate_key(key)?;
        validate_value(value)?;
        Ok(self.storage.update_env_var(owner, key, value).await?)
    }

    pub async fn get(&self, owner: Uuid, key: &str) -> Result<EnvironmentVariable, ServiceError> {
        Ok(self.storage.get_env_var(owner, key).await?)
    }

    /// All variables of an existing app. `NotFound` if the app is unknown.
    pub async fn list(&self, owner: Uuid) -> Result<Vec<EnvironmentVariable>, ServiceError> {
        self.storage.get_app(owner).await?;
        Ok(self.storage.list_env_vars(owner).await?)
    }

    pub async fn delete(&self, owner: Uuid, key: &str) -> Result<(), ServiceError> {
        Ok(self.storage.delete_env_var(owner, key).await?)
    }

    /// Remove every variable of an existing app, keeping the app itself.
    pub async fn delete_all(&self, owner: Uuid) -> Result<u64, ServiceError> {
        self.storage.get_app(owner).await?;
        Ok(self.storage.delete_env_vars_by_owner(owner).await?)
    }

    /// Create the variable, or update it when it already exists.
    ///
    /// A create that loses a race against a concurrent creator falls back to
    /// a single update.
    pub async fn upsert(
        &self,
        owner: Uuid,
        key: &str,
        value: &str,
    ) -> Result<Upserted, ServiceError> {
        validate_key(key)?;
        validate_value(value)?;
        self.upsert_unchecked(owner, key, value).await
    }

    async fn upsert_unchecked(
        &self,
        owner: Uuid,
        key: &str,
        value: &str,
    ) -> Result<Upserted, ServiceError> {
        match self.storage.update_env_var(owner, key, value).await {
            Ok(variable) => return Ok(Upserted { variable, created: false }),
            Err(StorageError::NotFound { .. }) => {},
            Err(e) => return Err(e.into()),
        }
        match self.storage.create_env_var(owner, key, value).await {
            Ok(variable) => Ok(Upserted { variable, created: true }),
            Err(StorageError::Conflict(_)) => {
                tracing::debug!(app_id = %owner, key, "lost create race, updating instead");
                let variable = self.storage.update_env_var(owner, key, value).await?;
                Ok(Upserted { variable, created: false })
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Upsert many pairs. Every pair is validated before the first write;
    /// writes are applied one by one, not as a single transaction.
    pub async fn import<I>(&self, owner: Uuid, pairs: I) -> Result<Vec<Upserted>, ServiceError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let pairs: Vec<(String, String)> = pairs.into_iter().collect();
        for (key, value) in &pairs {
            validate_key(key)?;
            validate_value(value)?;
        }
        self.storage.get_app(owner).await?;

        let mut results = Vec::with_capacity(pairs.len());
        for (key, value) in &pairs {
            results.push(self.upsert_unchecked(owner, key, value).await?);
        }
        let created = results.iter().filter(|r| r.created).count();
        tracing::info!(app_id = %owner, total = results.len(), created, "variables imported");
        Ok(results)
    }

    /// Render an app's variables in dotenv format.
    pub async fn export(&self, owner: Uuid) -> Result<String, ServiceError> {
        let vars = self.list(owner).await?;
        Ok(render_dotenv(&vars))
    }
}

#[cfg(test)]
mod tests {
    use envvars_core::MAX_VALUE_LENGTH;

    use super::*;

    async fn setup() -> (EnvVarService, Uuid) {
        let storage = Arc::new(StorageBackend::new_memory());
        let app = storage.create_app("app-1").await.unwrap();
        (EnvVarService::new(storage), app.id)
    }

    #[tokio::test]
    async fn create_get_conflict_example() {
        let (svc, app) = setup().await;
        svc.create(app, "DEBUG", "true").await.unwrap();
        assert_eq!(svc.get(app, "DEBUG").await.unwrap().value, "true");

        let err = svc.create(app, "DEBUG", "false").await.unwrap_err();
        assert!(err.is_conflict(), "got {err:?}");
    }

    #[tokio::test]
    async fn validation_runs_before_storage() {
        let (svc, app) = setup().await;
        let too_long = "x".repeat(MAX_VALUE_LENGTH + 1);
        let err = svc.create(app, "BIG", &too_long).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert!(svc.get(app, "BIG").await.unwrap_err().is_not_found());

        let err = svc.update(app, "", "v").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn upsert_creates_then_updates() {
        let (svc, app) = setup().await;
        let first = svc.upsert(app, "LEVEL", "info").await.unwrap();
        assert!(first.created);
        let second = svc.upsert(app, "LEVEL", "debug").await.unwrap();
        assert!(!second.created);
        assert_eq!(second.variable.id, first.variable.id);
        assert!(second.variable.updated > first.variable.updated);
    }

    #[tokio::test]
    async fn upsert_for_missing_app_is_not_found() {
        let (svc, _) = setup().await;
        let err = svc.upsert(Uuid::new_v4(), "LEVEL", "info").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn list_unknown_app_is_not_found() {
        let (svc, _) = setup().await;
        assert!(svc.list(Uuid::new_v4()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn import_validates_everything_first() {
        let (svc, app) = setup().await;
        let pairs = vec![
            ("GOOD".to_owned(), "1".to_owned()),
            ("BAD KEY".to_owned(), "2".to_owned()),
        ];
        let err = svc.import(app, pairs).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert!(svc.list(app).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn import_upserts_and_export_renders() {
        let (svc, app) = setup().await;
        svc.create(app, "PORT", "80").await.unwrap();

        let results = svc
            .import(
                app,
                vec![
                    ("PORT".to_owned(), "8080".to_owned()),
                    ("NAME".to_owned(), "my app".to_owned()),
                ],
            )
            .await
            .unwrap();
        assert_eq!(results.iter().filter(|r| r.created).count(), 1);

        let exported = svc.export(app).await.unwrap();
        assert_eq!(exported, "NAME=\"my app\"\nPORT=8080\n");
    }

    #[tokio::test]
    async fn delete_all_keeps_app() {
        let (svc, app) = setup().await;
        svc.create(app, "A", "1").await.unwrap();
        svc.create(app, "B", "2").await.unwrap();

        assert_eq!(svc.delete_all(app).await.unwrap(), 2);
        assert!(svc.list(app).await.unwrap().is_empty());
    }
}
