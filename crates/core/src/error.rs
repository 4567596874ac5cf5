use thiserror::Error;

/// Field validation failures, raised before anything reaches storage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} exceeds {max} characters (got {actual})")]
    TooLong { field: &'static str, max: usize, actual: usize },

    #[error("{field} contains invalid character {found:?}")]
    InvalidCharacter { field: &'static str, found: char },
}
