use anyhow::Result;
use envvars_http::{AppState, create_router};
use envvars_storage::StorageBackend;
use std::sync::Arc;

pub(crate) async fn run(storage: Arc<StorageBackend>, port: u16, host: String) -> Result<()> {
    let backend = storage.kind();
    let state = Arc::new(AppState::new(storage));

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!(%addr, backend, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("HTTP server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
