use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::MAX_APP_NAME_LENGTH;
use crate::env_var::now_micros;
use crate::error::ValidationError;

/// Owner of a set of environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub id: Uuid,
    pub name: String,
    pub created: DateTime<Utc>,
}

impl App {
    /// Builds a fresh app with a random id. Does not validate `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), name: name.into(), created: now_micros() }
    }
}

/// Checks an app name against the `apps.name` column.
pub fn validate_app_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Empty { field: "app name" });
    }
    let len = name.chars().count();
    if len > MAX_APP_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "app name",
            max: MAX_APP_NAME_LENGTH,
            actual: len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_limits() {
        assert!(validate_app_name("billing-api").is_ok());
        assert_eq!(validate_app_name("  "), Err(ValidationError::Empty { field: "app name" }));
        assert!(validate_app_name(&"a".repeat(MAX_APP_NAME_LENGTH)).is_ok());
        assert!(matches!(
            validate_app_name(&"a".repeat(MAX_APP_NAME_LENGTH + 1)),
            Err(ValidationError::TooLong { actual: 101, .. })
        ));
    }
}
