//! Typed error enum for the storage layer.
//!
//! Callers match on specific failure modes (not found, conflict, transient DB
//! errors) instead of downcasting opaque boxes.

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row not found for expected-present entity.
    #[error("not found: {entity} {id}")]
    NotFound { entity: &'static str, id: String },

    /// Unique constraint violation (`envvar_is_unique`, app name).
    #[error("conflict: {0}")]
    Conflict(String),

    /// SQL / connection / timeout failure.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),
}

impl StorageError {
    pub(crate) fn app_not_found(id: impl ToString) -> Self {
        Self::NotFound { entity: "app", id: id.to_string() }
    }

    pub(crate) fn env_var_not_found(owner: impl std::fmt::Display, key: &str) -> Self {
        Self::NotFound { entity: "environment variable", id: format!("{key} (app {owner})") }
    }

    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)))
    }

    /// Whether this error is a unique-constraint violation.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Custom `From<sqlx::Error>`, NOT blanket `#[from]`.
///
/// - `RowNotFound` → `NotFound` (generic; callers remap with entity context)
/// - SQLSTATE 23505 → `Conflict`
/// - SQLSTATE 23503 → `NotFound` for the referenced app
/// - Everything else → `Database`
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound { entity: "row", id: "unknown".into() },
            sqlx::Error::Database(db_err) if db_err.code().is_some_and(|c| c == "23505") => {
                Self::Conflict(db_err.message().to_owned())
            },
            sqlx::Error::Database(db_err) if db_err.code().is_some_and(|c| c == "23503") => {
                Self::NotFound { entity: "app", id: "unknown".into() }
            },
            _ => Self::Database(err),
        }
    }
}
