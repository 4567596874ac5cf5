//! Request body types (Deserialize)

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub struct CreateAppRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateEnvVarRequest {
    pub key: String,
    pub value: String,
}

/// Body of `PATCH`/`PUT` on a single variable.
#[derive(Debug, Deserialize)]
pub struct SetValueRequest {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub variables: BTreeMap<String, String>,
}
