use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use envvars_core::App;

use crate::AppState;
use crate::api_error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::query_types::CreateAppRequest;
use crate::response_types::AppDeleteResponse;

pub async fn list_apps(State(state): State<Arc<AppState>>) -> Result<Json<Vec<App>>, ApiError> {
    Ok(Json(state.app_service.list_apps().await?))
}

pub async fn create_app(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateAppRequest>,
) -> Result<(StatusCode, Json<App>), ApiError> {
    let app = state.app_service.create_app(&req.name).await?;
    Ok((StatusCode::CREATED, Json(app)))
}

pub async fn get_app(
    State(state): State<Arc<AppState>>,
    ApiPath(app_id): ApiPath<Uuid>,
) -> Result<Json<App>, ApiError> {
    Ok(Json(state.app_service.get_app(app_id).await?))
}

pub async fn delete_app(
    State(state): State<Arc<AppState>>,
    ApiPath(app_id): ApiPath<Uuid>,
) -> Result<Json<AppDeleteResponse>, ApiError> {
    let deleted_variables = state.app_service.delete_app(app_id).await?;
    Ok(Json(AppDeleteResponse { deleted: true, deleted_variables }))
}
