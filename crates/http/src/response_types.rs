//! Response types (Serialize)

use serde::Serialize;

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub backend: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct VersionResponse {
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AppDeleteResponse {
    pub deleted: bool,
    pub deleted_variables: u64,
}

#[derive(Debug, Serialize)]
pub struct EnvVarsDeleteResponse {
    pub deleted: u64,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: usize,
    pub created: usize,
}
