//! # storefront-auth
//!
//! Authentication and authorization for Storefront.
//!
//! ## Modules
//!
//! - `jwt` — signed bearer token issuing and decoding
//! - `credential` — bearer credential verification and identity resolution
//! - `password` — Argon2id password hashing and length policy
//! - `rbac` — role/permission resolution and gate decisions
//!
//! Authorization is a two-step contract: [`CredentialVerifier::resolve_identity`]
//! turns a bearer credential into a [`Principal`], then
//! [`AuthorizationResolver::load`] resolves that principal's role and
//! permission set into an [`AuthorizationContext`].

pub mod credential;
pub mod jwt;
pub mod password;
pub mod rbac;

pub use credential::{CredentialError, CredentialVerifier, Principal};
pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{AuthorizationContext, AuthorizationResolver, PermissionSet, RbacEnforcer};
