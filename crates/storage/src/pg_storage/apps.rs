//! AppStore implementation for PgStorage.

use async_trait::async_trait;
use envvars_core::App;
use uuid::Uuid;

use super::{APP_COLUMNS, PgStorage, row_to_app};
use crate::error::StorageError;
use crate::traits::AppStore;

#[async_trait]
impl AppStore for PgStorage {
    async fn create_app(&self, name: &str) -> Result<App, StorageError> {
        let app = App::new(name);
        sqlx::query(&format!("INSERT INTO apps ({APP_COLUMNS}) VALUES ($1, $2, $3)"))
            .bind(app.id)
            .bind(&app.name)
            .bind(app.created)
            .execute(&self.pool)
            .await
            .map_err(|e| match StorageError::from(e) {
                StorageError::Conflict(_) => {
                    StorageError::Conflict(format!("app '{name}' already exists"))
                },
                other => other,
            })?;
        tracing::info!(app_id = %app.id, name = %app.name, "app created");
        Ok(app)
    }

    async fn get_app(&self, id: Uuid) -> Result<App, StorageError> {
        let row = sqlx::query(&format!("SELECT {APP_COLUMNS} FROM apps WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_app(&r)).transpose()?.ok_or_else(|| StorageError::app_not_found(id))
    }

    async fn get_app_by_name(&self, name: &str) -> Result<App, StorageError> {
        let row = sqlx::query(&format!("SELECT {APP_COLUMNS} FROM apps WHERE name = $1"))
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_app(&r)).transpose()?.ok_or_else(|| StorageError::app_not_found(name))
    }

    async fn list_apps(&self) -> Result<Vec<App>, StorageError> {
        let rows = sqlx::query(&format!("SELECT {APP_COLUMNS} FROM apps ORDER BY name"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_app).collect()
    }

    async fn delete_app(&self, id: Uuid) -> Result<u64, StorageError> {
        // The FK cascades too; deleting children first yields the count.
        let mut tx = self.pool.begin().await?;
        let vars = sqlx::query("DELETE FROM environment_variables WHERE owner_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let apps = sqlx::query("DELETE FROM apps WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if apps == 0 {
            tx.rollback().await?;
            return Err(StorageError::app_not_found(id));
        }
        tx.commit().await?;
        tracing::info!(app_id = %id, deleted_variables = vars, "app deleted");
        Ok(vars)
    }
}
