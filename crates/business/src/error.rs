//! Business layer errors
//!
//! Assignment outcomes are not errors; only invalid input and storage
//! failures land here.

use director_core::CoreError;
use director_persistence::PersistenceError;
use thiserror::Error;

/// Business operation errors
#[derive(Debug, Error)]
pub enum BusinessError {
    /// Caller input rejected before any storage access
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store failed or returned something unreadable. Never retried.
    #[error("Data access failure: {0}")]
    DataAccess(#[from] PersistenceError),
}

/// Result type alias for business operations
pub type BusinessResult<T> = Result<T, BusinessError>;

impl BusinessError {
    /// True for errors caused by the request itself
    pub fn is_client_error(&self) -> bool {
        matches!(self, BusinessError::Core(_))
    }

    pub fn is_unrecognized_company(&self) -> bool {
        matches!(self, BusinessError::Core(e) if e.is_unrecognized_company())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_are_client_errors() {
        let err: BusinessError = CoreError::UnrecognizedCompany("ACME".into()).into();
        assert!(err.is_client_error());
        assert!(err.is_unrecognized_company());
        assert_eq!(err.to_string(), "Unrecognized company: ACME");
    }

    #[test]
    fn test_persistence_errors_are_server_errors() {
        let err: BusinessError = PersistenceError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(!err.is_client_error());
        assert!(err.to_string().starts_with("Data access failure"));
    }
}
