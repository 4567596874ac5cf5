//! PostgreSQL schema migrations for envvars storage.
//!
//! Every statement is idempotent; running twice is a no-op.

use envvars_core::ENVVAR_UNIQUE_CONSTRAINT;
use sqlx::PgPool;

use crate::error::StorageError;

/// Run all PostgreSQL migrations.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), StorageError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS apps (
            id UUID PRIMARY KEY,
            name VARCHAR(100) NOT NULL UNIQUE,
            created TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS environment_variables (
            id UUID PRIMARY KEY,
            created TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            key VARCHAR(100) NOT NULL,
            value VARCHAR(1000) NOT NULL,
            owner_id UUID NOT NULL REFERENCES apps (id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Composite uniqueness; also serves owner_id lookups as its leading column.
    let unique_index = format!(
        "CREATE UNIQUE INDEX IF NOT EXISTS {ENVVAR_UNIQUE_CONSTRAINT} ON environment_variables (owner_id, key)"
    );
    sqlx::query(&unique_index).execute(pool).await?;

    tracing::info!("PostgreSQL migrations applied");
    Ok(())
}
