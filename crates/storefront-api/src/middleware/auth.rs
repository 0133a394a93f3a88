//! Authorization gate: establishes identity, never evaluates permissions.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use storefront_core::error::AppError;

use crate::state::AppState;

/// Resolve the bearer credential and attach the [`storefront_auth::Principal`]
/// to the request. Any failure halts the request with 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let principal = match state.credential_verifier.resolve_identity(header).await {
        Ok(principal) => principal,
        Err(err) => {
            if !err.is_server_error() {
                warn!(path = %request.uri().path(), reason = %err.message, "Unauthenticated request");
            }
            return Err(err);
        }
    };

    debug!(user_id = %principal.id, "Request authenticated");
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
