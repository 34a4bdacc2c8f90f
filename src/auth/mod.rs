//! # Auth Module
//!
//! Shared-secret authorization for the message write endpoints.
//!
//! The secret is resolved once at startup and compared in constant time
//! against the `admin_key` request header.

pub mod admin_key;
pub mod crypto;
pub mod errors;

pub use admin_key::{AdminKey, ADMIN_KEY_HEADER};
pub use errors::{AuthError, AuthResult};
