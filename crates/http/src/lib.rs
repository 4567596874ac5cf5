//! HTTP API server for envvars.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod api_error;
pub mod extract;
mod handlers;
mod query_types;
mod response_types;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use envvars_service::{AppService, EnvVarService};
use envvars_storage::StorageBackend;

pub use response_types::{ReadinessResponse, VersionResponse};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Backend handle, used directly only by readiness checks
    pub storage: Arc<StorageBackend>,
    /// Service for app lifecycle
    pub app_service: Arc<AppService>,
    /// Service for environment variable operations
    pub env_var_service: Arc<EnvVarService>,
}

impl AppState {
    /// Build services over a shared backend.
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self {
            app_service: Arc::new(AppService::new(Arc::clone(&storage))),
            env_var_service: Arc::new(EnvVarService::new(Arc::clone(&storage))),
            storage,
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/readiness", get(readiness))
        .route("/api/version", get(version))
        .route("/api/apps", get(handlers::apps::list_apps).post(handlers::apps::create_app))
        .route(
            "/api/apps/{app_id}",
            get(handlers::apps::get_app).delete(handlers::apps::delete_app),
        )
        .route("/api/apps/{app_id}/export", get(handlers::env_vars::export_env_vars))
        .route("/api/apps/{app_id}/import", post(handlers::env_vars::import_env_vars))
        .route(
            "/api/apps/{app_id}/env",
            get(handlers::env_vars::list_env_vars)
                .post(handlers::env_vars::create_env_var)
                .delete(handlers::env_vars::delete_all_env_vars),
        )
        .route(
            "/api/apps/{app_id}/env/{key}",
            get(handlers::env_vars::get_env_var)
                .patch(handlers::env_vars::update_env_var)
                .put(handlers::env_vars::upsert_env_var)
                .delete(handlers::env_vars::delete_env_var),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn readiness(State(state): State<Arc<AppState>>) -> (StatusCode, Json<ReadinessResponse>) {
    let backend = state.storage.kind();
    match state.storage.ping().await {
        Ok(()) => {
            (StatusCode::OK, Json(ReadinessResponse { status: "ready", backend, message: None }))
        },
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse {
                    status: "unavailable",
                    backend,
                    message: Some(e.to_string()),
                }),
            )
        },
    }
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
