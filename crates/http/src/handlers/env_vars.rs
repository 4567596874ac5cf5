use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use envvars_core::EnvironmentVariable;

use crate::AppState;
use crate::api_error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::query_types::{CreateEnvVarRequest, ImportRequest, SetValueRequest};
use crate::response_types::{EnvVarsDeleteResponse, ImportResponse};

pub async fn list_env_vars(
    State(state): State<Arc<AppState>>,
    ApiPath(app_id): ApiPath<Uuid>,
) -> Result<Json<Vec<EnvironmentVariable>>, ApiError> {
    Ok(Json(state.env_var_service.list(app_id).await?))
}

pub async fn create_env_var(
    State(state): State<Arc<AppState>>,
    ApiPath(app_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<CreateEnvVarRequest>,
) -> Result<(StatusCode, Json<EnvironmentVariable>), ApiError> {
    let var = state.env_var_service.create(app_id, &req.key, &req.value).await?;
    Ok((StatusCode::CREATED, Json(var)))
}

pub async fn get_env_var(
    State(state): State<Arc<AppState>>,
    ApiPath((app_id, key)): ApiPath<(Uuid, String)>,
) -> Result<Json<EnvironmentVariable>, ApiError> {
    Ok(Json(state.env_var_service.get(app_id, &key).await?))
}

pub async fn update_env_var(
    State(state): State<Arc<AppState>>,
    ApiPath((app_id, key)): ApiPath<(Uuid, String)>,
    ApiJson(req): ApiJson<SetValueRequest>,
) -> Result<Json<EnvironmentVariable>, ApiError> {
    Ok(Json(state.env_var_service.update(app_id, &key, &req.value).await?))
}

pub async fn upsert_env_var(
    State(state): State<Arc<AppState>>,
    ApiPath((app_id, key)): ApiPath<(Uuid, String)>,
    ApiJson(req): ApiJson<SetValueRequest>,
) -> Result<(StatusCode, Json<EnvironmentVariable>), ApiError> {
    let upserted = state.env_var_service.upsert(app_id, &key, &req.value).await?;
    let status = if upserted.created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(upserted.variable)))
}

pub async fn delete_env_var(
    State(state): State<Arc<AppState>>,
    ApiPath((app_id, key)): ApiPath<(Uuid, String)>,
) -> Result<StatusCode, ApiError> {
    state.env_var_service.delete(app_id, &key).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_all_env_vars(
    State(state): State<Arc<AppState>>,
    ApiPath(app_id): ApiPath<Uuid>,
) -> Result<Json<EnvVarsDeleteResponse>, ApiError> {
    let deleted = state.env_var_service.delete_all(app_id).await?;
    Ok(Json(EnvVarsDeleteResponse { deleted }))
}

pub async fn import_env_vars(
    State(state): State<Arc<AppState>>,
    ApiPath(app_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<ImportRequest>,
) -> Result<Json<ImportResponse>, ApiError> {
    let results = state.env_var_service.import(app_id, req.variables).await?;
    let created = results.iter().filter(|r| r.created).count();
    Ok(Json(ImportResponse { imported: results.len(), created }))
}

pub async fn export_env_vars(
    State(state): State<Arc<AppState>>,
    ApiPath(app_id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let body = state.env_var_service.export(app_id).await?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}
