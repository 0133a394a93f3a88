//! Role handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use storefront_core::error::AppError;
use storefront_core::types::ApiResponse;

use crate::dto::request::{CreateRoleRequest, RolePermissionsRequest, UpdateRoleRequest};
use crate::dto::response::{PopulatedRoleResponse, RolePayload, RoleResponse, RolesPayload};
use crate::extractors::{ValidatedJson, parse_uuid};
use crate::state::AppState;

type PopulatedPayload = Json<ApiResponse<RolePayload<PopulatedRoleResponse>>>;

/// GET /api/roles
pub async fn list_roles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<RolesPayload>>, AppError> {
    let roles = state.role_service.list().await?;
    Ok(Json(ApiResponse::ok(
        "Roles retrieved successfully",
        RolesPayload {
            roles: roles.into_iter().map(RoleResponse::from).collect(),
        },
    )))
}

/// GET /api/roles/{id}
pub async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<PopulatedPayload, AppError> {
    let role = state.role_service.get(parse_uuid(&id)?).await?;
    Ok(Json(ApiResponse::ok(
        "Role retrieved successfully",
        RolePayload { role: role.into() },
    )))
}

/// POST /api/roles
pub async fn create_role(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateRoleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RolePayload<RoleResponse>>>), AppError> {
    let role = state.role_service.create(req.try_into()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "Role created successfully",
            RolePayload { role: role.into() },
        )),
    ))
}

/// PUT /api/roles/{id}
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateRoleRequest>,
) -> Result<PopulatedPayload, AppError> {
    let id = parse_uuid(&id)?;
    let role = state.role_service.update(id, req.try_into()?).await?;
    Ok(Json(ApiResponse::ok(
        "Role updated successfully",
        RolePayload { role: role.into() },
    )))
}

/// DELETE /api/roles/{id}
pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Option<()>>>, AppError> {
    state.role_service.delete(parse_uuid(&id)?).await?;
    Ok(Json(ApiResponse::message("Role deleted successfully")))
}

/// PUT /api/roles/{id}/permissions
pub async fn assign_permissions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<RolePermissionsRequest>,
) -> Result<PopulatedPayload, AppError> {
    let role = state
        .role_service
        .assign_permissions(parse_uuid(&id)?, &req.permissions)
        .await?;
    Ok(Json(ApiResponse::ok(
        "Permissions assigned successfully",
        RolePayload { role: role.into() },
    )))
}

/// DELETE /api/roles/{id}/permissions
pub async fn unassign_permissions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<RolePermissionsRequest>,
) -> Result<PopulatedPayload, AppError> {
    let role = state
        .role_service
        .unassign_permissions(parse_uuid(&id)?, &req.permissions)
        .await?;
    Ok(Json(ApiResponse::ok(
        "Permissions removed successfully",
        RolePayload { role: role.into() },
    )))
}
