use async_trait::async_trait;
use envvars_core::App;
use uuid::Uuid;

use crate::error::StorageError;

/// Owner lifecycle operations.
#[async_trait]
pub trait AppStore: Send + Sync {
    /// Create an app. `Conflict` if the name is taken.
    async fn create_app(&self, name: &str) -> Result<App, StorageError>;

    /// Get app by ID.
    async fn get_app(&self, id: Uuid) -> Result<App, StorageError>;

    /// Get app by its unique name.
    async fn get_app_by_name(&self, name: &str) -> Result<App, StorageError>;

    /// All apps, ordered by name.
    async fn list_apps(&self) -> Result<Vec<App>, StorageError>;

    /// Delete an app and, atomically, every variable it owns.
    /// Returns the number of variables removed.
    async fn delete_app(&self, id: Uuid) -> Result<u64, StorageError>;
}
