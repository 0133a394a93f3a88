//! Permission handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use storefront_core::error::AppError;
use storefront_core::types::ApiResponse;

use crate::dto::request::{CreatePermissionRequest, UpdatePermissionRequest};
use crate::dto::response::{PermissionPayload, PermissionResponse, PermissionsPayload};
use crate::extractors::{ValidatedJson, parse_uuid};
use crate::state::AppState;

/// GET /api/permissions
pub async fn list_permissions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PermissionsPayload>>, AppError> {
    let permissions = state.permission_service.list().await?;
    Ok(Json(ApiResponse::ok(
        "Permissions retrieved successfully",
        PermissionsPayload {
            permissions: permissions
                .into_iter()
                .map(PermissionResponse::from)
                .collect(),
        },
    )))
}

/// GET /api/permissions/{id}
pub async fn get_permission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PermissionPayload>>, AppError> {
    let permission = state.permission_service.get(parse_uuid(&id)?).await?;
    Ok(Json(ApiResponse::ok(
        "Permission retrieved successfully",
        PermissionPayload {
            permission: permission.into(),
        },
    )))
}

/// POST /api/permissions
pub async fn create_permission(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreatePermissionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PermissionPayload>>), AppError> {
    let permission = state.permission_service.create(req.try_into()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "Permission created successfully",
            PermissionPayload {
                permission: permission.into(),
            },
        )),
    ))
}

/// PUT /api/permissions/{id}
pub async fn update_permission(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdatePermissionRequest>,
) -> Result<Json<ApiResponse<PermissionPayload>>, AppError> {
    let id = parse_uuid(&id)?;
    let permission = state.permission_service.update(id, req.try_into()?).await?;
    Ok(Json(ApiResponse::ok(
        "Permission updated successfully",
        PermissionPayload {
            permission: permission.into(),
        },
    )))
}

/// DELETE /api/permissions/{id}
pub async fn delete_permission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Option<()>>>, AppError> {
    state.permission_service.delete(parse_uuid(&id)?).await?;
    Ok(Json(ApiResponse::message("Permission deleted successfully")))
}
