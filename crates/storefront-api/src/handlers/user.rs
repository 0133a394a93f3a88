//! User handlers.

use axum::Json;
use axum::extract::{Path, State};

use storefront_core::error::AppError;
use storefront_core::types::ApiResponse;

use crate::dto::request::{UpdateUserRequest, UpdateUserRoleRequest};
use crate::dto::response::{UserPayload, UserResponse, UsersPayload};
use crate::extractors::{AuthUser, ValidatedJson, parse_uuid};
use crate::state::AppState;

/// GET /api/users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserPayload>>, AppError> {
    let user = state.user_service.get(auth.id).await?;
    Ok(Json(ApiResponse::ok(
        "User profile retrieved successfully",
        UserPayload { user: user.into() },
    )))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UsersPayload>>, AppError> {
    let users = state.user_service.list().await?;
    Ok(Json(ApiResponse::ok(
        "Users retrieved successfully",
        UsersPayload {
            users: users.into_iter().map(UserResponse::from).collect(),
        },
    )))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserPayload>>, AppError> {
    let user = state.user_service.get(parse_uuid(&id)?).await?;
    Ok(Json(ApiResponse::ok(
        "User retrieved successfully",
        UserPayload { user: user.into() },
    )))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserPayload>>, AppError> {
    let user = state
        .user_service
        .update(parse_uuid(&id)?, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(
        "User updated successfully",
        UserPayload { user: user.into() },
    )))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Option<()>>>, AppError> {
    state.user_service.delete(parse_uuid(&id)?).await?;
    Ok(Json(ApiResponse::message("User deleted successfully")))
}

/// PATCH /api/users/{id}/role
pub async fn update_user_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRoleRequest>,
) -> Result<Json<ApiResponse<UserPayload>>, AppError> {
    let user = state
        .user_service
        .assign_role(parse_uuid(&id)?, &req.role_name)
        .await?;
    let role_name = user
        .role
        .as_ref()
        .map(|r| r.name.to_string())
        .unwrap_or_default();
    Ok(Json(ApiResponse::ok(
        format!("Role updated to '{role_name}' successfully"),
        UserPayload { user: user.into() },
    )))
}
