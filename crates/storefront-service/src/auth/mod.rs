//! Registration, login, and password changes.

pub mod service;

pub use service::{AuthService, AuthSession, RegisterRequest};
