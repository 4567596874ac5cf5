use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{MAX_KEY_LENGTH, MAX_VALUE_LENGTH};
use crate::error::ValidationError;

/// A key/value pair scoped to one owning [`crate::App`].
///
/// `(owner, key)` is unique across all records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    pub id: Uuid,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub key: String,
    pub value: String,
    pub owner: Uuid,
}

impl EnvironmentVariable {
    /// Builds a record for insertion; `created == updated`.
    #[must_use]
    pub fn new(owner: Uuid, key: impl Into<String>, value: impl Into<String>) -> Self {
        let now = now_micros();
        Self {
            id: Uuid::new_v4(),
            created: now,
            updated: now,
            key: key.into(),
            value: value.into(),
            owner,
        }
    }

    /// Replaces the value and bumps `updated` past its previous value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.updated = next_update_timestamp(self.updated);
    }
}

/// Current time at the microsecond precision PostgreSQL stores.
#[must_use]
pub fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamp for a mutation of a record last touched at `previous`.
///
/// Strictly greater than `previous` even when the clock has not advanced
/// by a full microsecond, or has stepped backwards.
#[must_use]
pub fn next_update_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let floor = previous + Duration::microseconds(1);
    now_micros().max(floor)
}

/// Checks a key against the `key` column and env var naming rules.
///
/// `=`, whitespace and control characters are rejected since the key must
/// survive a round trip through dotenv export.
pub fn validate_key(key: &str) -> Result<(), ValidationError> {
    if key.is_empty() {
        return Err(ValidationError::Empty { field: "key" });
    }
    let len = key.chars().count();
    if len > MAX_KEY_LENGTH {
        return Err(ValidationError::TooLong { field: "key", max: MAX_KEY_LENGTH, actual: len });
    }
    if let Some(found) = key.chars().find(|c| *c == '=' || c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::InvalidCharacter { field: "key", found });
    }
    Ok(())
}

/// Checks a value against the `value` column. Empty values are allowed.
///
/// Newlines and tabs are the only control characters accepted: PostgreSQL
/// text cannot hold NUL, and dotenv parsers have no escape for the rest.
pub fn validate_value(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > MAX_VALUE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "value",
            max: MAX_VALUE_LENGTH,
            actual: len,
        });
    }
    if let Some(found) = value.chars().find(|c| c.is_control() && !matches!(*c, '\n' | '\t')) {
        return Err(ValidationError::InvalidCharacter { field: "value", found });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_has_equal_timestamps() {
        let var = EnvironmentVariable::new(Uuid::new_v4(), "DEBUG", "true");
        assert_eq!(var.created, var.updated);
        assert_eq!(var.key, "DEBUG");
        assert_eq!(var.value, "true");
    }

    #[test]
    fn set_value_strictly_advances_updated() {
        let mut var = EnvironmentVariable::new(Uuid::new_v4(), "DEBUG", "true");
        let before = var.updated;
        var.set_value("false");
        assert!(var.updated > before);
        assert_eq!(var.created, before);
        assert_eq!(var.value, "false");
    }

    #[test]
    fn next_update_timestamp_handles_future_previous() {
        let future = now_micros() + Duration::hours(1);
        let next = next_update_timestamp(future);
        assert_eq!(next, future + Duration::microseconds(1));
    }

    #[test]
    fn key_limits() {
        assert!(validate_key("DATABASE_URL").is_ok());
        assert!(validate_key(&"K".repeat(MAX_KEY_LENGTH)).is_ok());
        assert_eq!(validate_key(""), Err(ValidationError::Empty { field: "key" }));
        assert!(matches!(
            validate_key(&"K".repeat(MAX_KEY_LENGTH + 1)),
            Err(ValidationError::TooLong { field: "key", .. })
        ));
        assert_eq!(
            validate_key("A=B"),
            Err(ValidationError::InvalidCharacter { field: "key", found: '=' })
        );
        assert!(validate_key("TWO WORDS").is_err());
    }

    #[test]
    fn value_limits_count_characters_not_bytes() {
        assert!(validate_value("").is_ok());
        // 1000 three-byte characters still fit.
        assert!(validate_value(&"€".repeat(MAX_VALUE_LENGTH)).is_ok());
        assert!(validate_value(&"x".repeat(MAX_VALUE_LENGTH + 1)).is_err());
    }

    #[test]
    fn value_control_characters() {
        assert!(validate_value("line one\nline two").is_ok());
        assert!(validate_value("a\tb").is_ok());
        assert_eq!(
            validate_value("nul\0byte"),
            Err(ValidationError::InvalidCharacter { field: "value", found: '\0' })
        );
        assert_eq!(
            validate_value("a\r\nb"),
            Err(ValidationError::InvalidCharacter { field: "value", found: '\r' })
        );
    }
}
