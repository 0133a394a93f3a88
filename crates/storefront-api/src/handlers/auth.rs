//! Authentication handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use storefront_core::error::AppError;
use storefront_core::types::ApiResponse;

use crate::dto::request::{ChangePasswordRequest, LoginRequest, RegisterRequest};
use crate::dto::response::AuthResponse;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), AppError> {
    let session = state.auth_service.register(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "User registered successfully",
            AuthResponse::from(session),
        )),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let session = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(ApiResponse::ok(
        "Login successful",
        AuthResponse::from(session),
    )))
}

/// POST /api/auth/logout
pub async fn logout() -> Json<ApiResponse<Option<()>>> {
    Json(ApiResponse::message(
        "Logout successful (token should be invalidated client-side)",
    ))
}

/// PUT /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<Option<()>>>, AppError> {
    state
        .auth_service
        .change_password(auth.id, &req.current_password, &req.new_password)
        .await?;
    Ok(Json(ApiResponse::message("Password updated successfully")))
}
