//! Bearer credential verification.

pub mod error;
pub mod principal;
pub mod verifier;

pub use error::CredentialError;
pub use principal::Principal;
pub use verifier::CredentialVerifier;
