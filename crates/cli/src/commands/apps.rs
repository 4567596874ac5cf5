use anyhow::Result;
use envvars_service::AppService;
use envvars_storage::StorageBackend;
use std::sync::Arc;

use crate::AppsCommand;

pub(crate) async fn run(storage: Arc<StorageBackend>, command: AppsCommand) -> Result<()> {
    let service = AppService::new(storage);
    match command {
        AppsCommand::List => {
            let apps = service.list_apps().await?;
            println!("{}", serde_json::to_string_pretty(&apps)?);
        },
        AppsCommand::Create { name } => {
            let app = service.create_app(&name).await?;
            println!("{}", serde_json::to_string_pretty(&app)?);
        },
        AppsCommand::Delete { app } => {
            let app = service.resolve(&app).await?;
            let removed = service.delete_app(app.id).await?;
            println!("Deleted app {} ({} variables removed)", app.name, removed);
        },
    }
    Ok(())
}
