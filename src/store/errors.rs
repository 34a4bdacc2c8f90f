//! # Store Errors
//!
//! Error types for the data access module.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while talking to the SQLite backing store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The driver rejected a statement or the connection failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The backing file or its directory could not be prepared
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Short machine-readable kind, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Database(_) => "database",
            StoreError::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.kind(), "database");

        let err = StoreError::from(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(err.kind(), "io");
        assert!(err.to_string().contains("boom"));
    }
}
