//! # Admin Key
//!
//! A request is authorized iff it supplies a key that is non-blank and not
//! numerically below 1, the server has a secret configured, and both are
//! equal.

use std::fmt;

use super::crypto::constant_time_str_eq;
use super::errors::{AuthError, AuthResult};

/// Request header carrying the shared secret
pub const ADMIN_KEY_HEADER: &str = "admin_key";

/// The configured admin secret
#[derive(Clone, Default)]
pub struct AdminKey {
    secret: Option<String>,
}

impl AdminKey {
    /// An empty secret is treated as not configured
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    /// A key that rejects every request
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Check a supplied key against the secret
    pub fn authorize(&self, supplied: Option<&str>) -> AuthResult<()> {
        let supplied = supplied.ok_or(AuthError::MissingKey)?;

        if is_zero_like(supplied) {
            return Err(AuthError::InvalidKey);
        }

        let secret = self.secret.as_deref().ok_or(AuthError::NotConfigured)?;

        if constant_time_str_eq(supplied, secret) {
            Ok(())
        } else {
            Err(AuthError::InvalidKey)
        }
    }
}

impl fmt::Debug for AdminKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminKey")
            .field("configured", &self.is_configured())
            .finish()
    }
}

/// Blank keys and keys that read as a number below 1
fn is_zero_like(key: &str) -> bool {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return true;
    }
    trimmed.parse::<f64>().map(|n| n < 1.0).unwrap_or(false)
}
