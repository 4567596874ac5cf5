//! Typed API error for HTTP handlers.
//!
//! Converts domain errors into HTTP responses with a JSON body and status
//! code. Handlers return `Result<Json<T>, ApiError>`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use envvars_service::ServiceError;
use envvars_storage::StorageError;

/// API error with HTTP status code and human-readable message.
///
/// Converts to JSON response: `{"error": "message"}`.
///
/// `Internal` logs the real error server-side and returns a static message
/// to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: invalid input from caller.
    BadRequest(String),
    /// 404 Not Found: requested app or variable doesn't exist.
    NotFound(String),
    /// 409 Conflict: `(owner, key)` or app name already taken.
    Conflict(String),
    /// 500 Internal Server Error. Details logged, not exposed.
    Internal(anyhow::Error),
    /// 503 Service Unavailable: storage unreachable.
    ServiceUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            ServiceError::Storage(StorageError::NotFound { entity, id }) => {
                Self::NotFound(format!("{entity} '{id}' not found"))
            },
            ServiceError::Storage(StorageError::Conflict(msg)) => Self::Conflict(msg),
            ServiceError::Storage(e) if e.is_transient() => {
                tracing::warn!(error = %e, "storage temporarily unavailable");
                Self::ServiceUnavailable("storage temporarily unavailable".to_owned())
            },
            ServiceError::Storage(e) => Self::Internal(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ServiceError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn pool_timeout_is_service_unavailable() {
        let err = ServiceError::Storage(StorageError::from(sqlx::Error::PoolTimedOut));
        assert_eq!(status_of(err), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn other_database_errors_are_internal() {
        let err = ServiceError::Storage(StorageError::from(sqlx::Error::PoolClosed));
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn domain_errors_map_to_client_statuses() {
        let not_found = StorageError::NotFound { entity: "app", id: "a1".into() };
        assert_eq!(status_of(not_found.into()), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(StorageError::Conflict("taken".into()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ServiceError::InvalidInput("bad".into())),
            StatusCode::BAD_REQUEST
        );
    }
}
