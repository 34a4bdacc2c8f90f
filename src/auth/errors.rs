//! # Auth Errors
//!
//! Error types for admin-key authorization.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Reasons a write request is not authorized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `admin_key` header was sent
    #[error("Missing admin key")]
    MissingKey,

    /// The key is blank, zero-like, or does not match the secret
    #[error("Invalid admin key")]
    InvalidKey,

    /// The server has no admin secret, so nothing can be authorized
    #[error("Admin key not configured")]
    NotConfigured,
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MissingKey => 401,
            AuthError::InvalidKey => 401,
            AuthError::NotConfigured => 401,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_auth_errors_are_unauthorized() {
        for err in [AuthError::MissingKey, AuthError::InvalidKey, AuthError::NotConfigured] {
            assert_eq!(err.status_code(), 401);
        }
    }

    #[test]
    fn test_error_messages_do_not_leak_secret() {
        assert_eq!(AuthError::InvalidKey.to_string(), "Invalid admin key");
    }
}
