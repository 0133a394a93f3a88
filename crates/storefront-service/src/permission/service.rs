//! Permission CRUD.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_database::PermissionStore;
use storefront_entity::permission::{CreatePermission, Permission, UpdatePermission};

use crate::validation;

/// Handles permission administration.
#[derive(Clone)]
pub struct PermissionService {
    permissions: Arc<dyn PermissionStore>,
}

impl std::fmt::Debug for PermissionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionService").finish_non_exhaustive()
    }
}

impl PermissionService {
    /// Creates a new permission service.
    pub fn new(permissions: Arc<dyn PermissionStore>) -> Self {
        Self { permissions }
    }

    /// Lists every permission.
    pub async fn list(&self) -> AppResult<Vec<Permission>> {
        self.permissions.list().await
    }

    /// Gets a permission.
    pub async fn get(&self, id: Uuid) -> AppResult<Permission> {
        self.permissions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Permission not found"))
    }

    /// Creates a permission.
    pub async fn create(&self, data: CreatePermission) -> AppResult<Permission> {
        validation::not_blank(&data.description, "Description")?;
        if self.permissions.find_by_name(&data.name).await?.is_some() {
            return Err(AppError::conflict("Permission already exists"));
        }
        let permission = self.permissions.create(&data).await?;
        info!(permission_id = %permission.id, name = %permission.name, "Permission created");
        Ok(permission)
    }

    /// Renames a permission and/or changes its description.
    pub async fn update(&self, id: Uuid, data: UpdatePermission) -> AppResult<Permission> {
        if let Some(description) = &data.description {
            validation::not_blank(description, "Description")?;
        }
        let current = self.get(id).await?;
        if let Some(name) = &data.name {
            if *name != current.name && self.permissions.find_by_name(name).await?.is_some() {
                return Err(AppError::conflict(
                    "A permission with that name already exists",
                ));
            }
        }

        let permission = self
            .permissions
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Permission not found"))?;
        info!(permission_id = %id, name = %permission.name, "Permission updated");
        Ok(permission)
    }

    /// Deletes a permission, dropping it from every role.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.permissions.delete(id).await? {
            return Err(AppError::not_found("Permission not found"));
        }
        info!(permission_id = %id, "Permission deleted");
        Ok(())
    }
}
