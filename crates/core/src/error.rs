//! # Error Module
//!
//! Domain errors raised before any storage access happens.

use thiserror::Error;

/// Core domain errors.
///
/// Both variants are caller mistakes; the HTTP layer maps them to 400.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Unrecognized company: {0}")]
    UnrecognizedCompany(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias với CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Missing or blank required field
    pub fn missing_field(field: &str) -> Self {
        CoreError::InvalidInput(format!("'{}' is required", field))
    }

    pub fn is_unrecognized_company(&self) -> bool {
        matches!(self, CoreError::UnrecognizedCompany(_))
    }
}
