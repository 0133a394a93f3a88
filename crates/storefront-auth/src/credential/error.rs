//! Credential failure taxonomy.

use thiserror::Error;

use storefront_core::error::AppError;

/// Why a presented credential did not resolve to a user.
///
/// Every variant is reported to the client as "not authenticated" (401).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// No bearer token was presented.
    #[error("Not authenticated, no token provided")]
    MissingCredential,
    /// The token is malformed, expired, or signed with another key.
    #[error("Not authenticated, {0}")]
    InvalidCredential(&'static str),
    /// The token is valid but its subject no longer exists.
    #[error("Not authenticated, user no longer exists")]
    UnknownSubject,
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        AppError::unauthorized(err.to_string())
    }
}
