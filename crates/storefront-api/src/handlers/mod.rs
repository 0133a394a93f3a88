//! Route handlers organized by domain.

pub mod auth;
pub mod health;
pub mod permission;
pub mod product;
pub mod role;
pub mod user;

use axum::Json;
use axum::http::StatusCode;

use storefront_core::types::response::ErrorEnvelope;

/// Fallback for unmatched routes.
pub async fn not_found() -> (StatusCode, Json<ErrorEnvelope>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorEnvelope::new("Route not found", None)),
    )
}
