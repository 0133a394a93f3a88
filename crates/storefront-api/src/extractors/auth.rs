//! `AuthUser` extractor — reads the principal the authorization gate attached.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use storefront_auth::Principal;
use storefront_core::error::AppError;

/// The authenticated principal, available to handlers behind the
/// authorization gate.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized("User not authenticated"))
    }
}
