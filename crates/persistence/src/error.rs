//! # Persistence Errors
//!
//! Error types cho persistence layer, wrapping sqlx errors.

use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value the domain cannot represent
    #[error("Invalid stored value: {field} = {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias cho PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl PersistenceError {
    pub fn invalid_value(field: &str, value: &str) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Kiểm tra có phải lỗi database không
    pub fn is_database_error(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value() {
        let err = PersistenceError::invalid_value("company", "ACME");
        assert!(!err.is_database_error());
        assert_eq!(err.to_string(), "Invalid stored value: company = ACME");
    }

    #[test]
    fn test_database_error_wraps_sqlx() {
        let err: PersistenceError = sqlx::Error::RowNotFound.into();
        assert!(err.is_database_error());
    }
}
