//! Health check handler.

use axum::Json;
use axum::extract::State;

use storefront_core::types::ApiResponse;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let status = match state.repos.health_check().await {
        Ok(true) => "ok",
        _ => "degraded",
    };

    Json(ApiResponse::ok(
        "Service is running",
        HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: state.repos.provider_name().to_string(),
        },
    ))
}
