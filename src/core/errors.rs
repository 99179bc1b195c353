//! Error types for staffdb
//!
//! Two kinds of failure are kept apart: input that never reaches the
//! database (`ValidationError`) and failures of the database itself
//! (`StoreError::Storage`).

use thiserror::Error;

/// Errors raised while turning raw input into an employee record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Full name must not be empty")]
    EmptyName,

    #[error("Invalid birth date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unrecognized gender '{0}', expected Male or Female")]
    InvalidGender(String),
}

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Corrupt row in employees table: {0}")]
    CorruptRow(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl StoreError {
    /// True when the error was caused by bad input rather than the database
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_converts_into_store_error() {
        let err: StoreError = ValidationError::EmptyName.into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: Full name must not be empty");
    }

    #[test]
    fn test_storage_error_is_not_validation() {
        let err = StoreError::Storage(rusqlite::Error::QueryReturnedNoRows);
        assert!(!err.is_validation());
    }
}
