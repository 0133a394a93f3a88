//! # storefront-api
//!
//! HTTP API layer for Storefront built on Axum.
//!
//! Every protected route runs the authorization gate first (bearer
//! credential → [`storefront_auth::Principal`] in the request extensions),
//! then at most one permission or owner-or-permission gate, then the
//! handler.

pub mod app;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, shutdown_signal};
pub use state::AppState;
