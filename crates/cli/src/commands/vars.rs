use anyhow::{Context, Result};
use envvars_core::App;
use envvars_service::{AppService, EnvVarService};
use envvars_storage::StorageBackend;
use std::path::Path;
use std::sync::Arc;

/// Resolve `app` (name or UUID) to its record.
async fn resolve_owner(storage: &Arc<StorageBackend>, app: &str) -> Result<App> {
    Ok(AppService::new(Arc::clone(storage)).resolve(app).await?)
}

pub(crate) async fn set(storage: Arc<StorageBackend>, app: &str, key: &str, value: &str) -> Result<()> {
    let owner = resolve_owner(&storage, app).await?;
    let upserted = EnvVarService::new(storage).upsert(owner.id, key, value).await?;
    let verb = if upserted.created { "Created" } else { "Updated" };
    println!("{verb} {key} for {}", owner.name);
    Ok(())
}

pub(crate) async fn get(storage: Arc<StorageBackend>, app: &str, key: &str) -> Result<()> {
    let owner = resolve_owner(&storage, app).await?;
    let var = EnvVarService::new(storage).get(owner.id, key).await?;
    println!("{}", var.value);
    Ok(())
}

pub(crate) async fn list(storage: Arc<StorageBackend>, app: &str) -> Result<()> {
    let owner = resolve_owner(&storage, app).await?;
    let vars = EnvVarService::new(storage).list(owner.id).await?;
    println!("{}", serde_json::to_string_pretty(&vars)?);
    Ok(())
}

pub(crate) async fn unset(storage: Arc<StorageBackend>, app: &str, key: &str) -> Result<()> {
    let owner = resolve_owner(&storage, app).await?;
    EnvVarService::new(storage).delete(owner.id, key).await?;
    println!("Deleted {key} from {}", owner.name);
    Ok(())
}

pub(crate) async fn export(storage: Arc<StorageBackend>, app: &str) -> Result<()> {
    let owner = resolve_owner(&storage, app).await?;
    let rendered = EnvVarService::new(storage).export(owner.id).await?;
    print!("{rendered}");
    Ok(())
}

pub(crate) async fn import(storage: Arc<StorageBackend>, app: &str, file: &Path) -> Result<()> {
    let pairs = dotenvy::from_path_iter(file)
        .with_context(|| format!("failed to open {}", file.display()))?
        .collect::<Result<Vec<(String, String)>, _>>()
        .with_context(|| format!("failed to parse {}", file.display()))?;
    let owner = resolve_owner(&storage, app).await?;
    let results = EnvVarService::new(storage).import(owner.id, pairs).await?;
    let created = results.iter().filter(|r| r.created).count();
    println!(
        "Imported {} variables into {} ({} created, {} updated)",
        results.len(),
        owner.name,
        created,
        results.len() - created
    );
    Ok(())
}
