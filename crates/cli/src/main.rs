use anyhow::Result;
use clap::{Parser, Subcommand};
use envvars_storage::StorageBackend;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "envvars")]
#[command(about = "Owner-scoped environment variable store", long_about = None)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// Use an ephemeral in-memory store instead of PostgreSQL
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(short, long, default_value = "37780")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Apply database migrations and exit
    Migrate,
    /// Manage apps
    Apps {
        #[command(subcommand)]
        command: AppsCommand,
    },
    /// Create or update a variable
    Set { app: String, key: String, value: String },
    /// Print a variable's value
    Get { app: String, key: String },
    /// List an app's variables as JSON
    List { app: String },
    /// Delete a variable
    Unset { app: String, key: String },
    /// Print an app's variables in dotenv format
    Export { app: String },
    /// Upsert variables from a dotenv file
    Import { app: String, file: PathBuf },
}

#[derive(Subcommand)]
enum AppsCommand {
    List,
    Create { name: String },
    /// Delete an app and all of its variables
    Delete { app: String },
}

async fn open_storage(cli: &Cli) -> Result<Arc<StorageBackend>> {
    if cli.memory {
        tracing::warn!("using in-memory store; data is lost on exit");
        return Ok(Arc::new(StorageBackend::new_memory()));
    }
    let url = cli
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set (or pass --memory)"))?;
    Ok(Arc::new(StorageBackend::new_postgres(url).await?))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    if let Commands::Migrate = cli.command {
        return commands::migrate::run(cli.database_url.as_deref()).await;
    }

    let storage = open_storage(&cli).await?;

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(storage, port, host).await,
        // Handled before the store is opened.
        Commands::Migrate => Ok(()),
        Commands::Apps { command } => commands::apps::run(storage, command).await,
        Commands::Set { app, key, value } => commands::vars::set(storage, &app, &key, &value).await,
        Commands::Get { app, key } => commands::vars::get(storage, &app, &key).await,
        Commands::List { app } => commands::vars::list(storage, &app).await,
        Commands::Unset { app, key } => commands::vars::unset(storage, &app, &key).await,
        Commands::Export { app } => commands::vars::export(storage, &app).await,
        Commands::Import { app, file } => commands::vars::import(storage, &app, &file).await,
    }
}
