//! CLI-specific error types
//!
//! Every CLI error is fatal: `main` prints it and exits non-zero.

use std::fmt;

use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Invalid configuration
    ConfigError,
    /// The store could not be opened or prepared
    StoreError,
    /// Boot failed
    BootFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "ANALITICA_CLI_CONFIG_ERROR",
            Self::StoreError => "ANALITICA_CLI_STORE_ERROR",
            Self::BootFailed => "ANALITICA_CLI_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::new(CliErrorCode::StoreError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("PORT must not be 0");
        assert_eq!(err.to_string(), "ANALITICA_CLI_CONFIG_ERROR: PORT must not be 0");
        assert_eq!(err.message(), "PORT must not be 0");
    }

    #[test]
    fn test_store_error_conversion() {
        let err = CliError::from(StoreError::from(sqlx::Error::PoolClosed));
        assert_eq!(err.code(), &CliErrorCode::StoreError);
    }
}
