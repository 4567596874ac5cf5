use std::sync::Arc;

use envvars_core::{App, validate_app_name};
use envvars_storage::StorageBackend;
use envvars_storage::traits::AppStore;
use uuid::Uuid;

use crate::ServiceError;

pub struct AppService {
    storage: Arc<StorageBackend>,
}

impl AppService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    pub async fn create_app(&self, name: &str) -> Result<App, ServiceError> {
        validate_app_name(name)?;
        Ok(self.storage.create_app(name).await?)
    }

    pub async fn get_app(&self, id: Uuid) -> Result<App, ServiceError> {
        Ok(self.storage.get_app(id).await?)
    }

    /// Look an app up by UUID when `reference` parses as one, by name otherwise.
    pub async fn resolve(&self, reference: &str) -> Result<App, ServiceError> {
        match Uuid::parse_str(reference) {
            Ok(id) => Ok(self.storage.get_app(id).await?),
            Err(_) => Ok(self.storage.get_app_by_name(reference).await?),
        }
    }

    pub async fn list_apps(&self) -> Result<Vec<App>, ServiceError> {
        Ok(self.storage.list_apps().await?)
    }

    /// Delete an app with all its variables; returns how many were removed.
    pub async fn delete_app(&self, id: Uuid) -> Result<u64, ServiceError> {
        let removed = self.storage.delete_app(id).await?;
        tracing::info!(app_id = %id, removed, "app and variables removed");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AppService {
        AppService::new(Arc::new(StorageBackend::new_memory()))
    }

    #[tokio::test]
    async fn rejects_invalid_names_before_storage() {
        let svc = service();
        let err = svc.create_app("").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert!(svc.list_apps().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn resolve_by_id_or_name() {
        let svc = service();
        let app = svc.create_app("web").await.unwrap();

        assert_eq!(svc.resolve("web").await.unwrap().id, app.id);
        assert_eq!(svc.resolve(&app.id.to_string()).await.unwrap().id, app.id);
        assert!(svc.resolve("missing").await.unwrap_err().is_not_found());
    }
}
