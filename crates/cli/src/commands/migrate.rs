//! Schema migration command.
//!
//! Idempotent: every statement is `IF NOT EXISTS`, so re-running is safe.

use envvars_storage::{PgPoolConfig, PgStorage};

pub(crate) async fn run(database_url: Option<&str>) -> anyhow::Result<()> {
    let url = database_url
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set for migrations"))?;
    let storage = PgStorage::connect(url, PgPoolConfig::from_env()).await?;
    storage.migrate().await?;
    println!("Migrations applied.");
    Ok(())
}
