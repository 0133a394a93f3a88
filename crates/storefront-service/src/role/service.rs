//! Role CRUD and permission assignment.
//!
//! Assigning is a set union and unassigning a set difference: ids already
//! present (or already absent) are skipped without error.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_database::{PermissionStore, RoleStore};
use storefront_entity::role::{CreateRole, PopulatedRole, Role, UpdateRole};

use crate::validation;

/// Handles role administration.
#[derive(Clone)]
pub struct RoleService {
    roles: Arc<dyn RoleStore>,
    permissions: Arc<dyn PermissionStore>,
}

impl std::fmt::Debug for RoleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleService").finish_non_exhaustive()
    }
}

impl RoleService {
    /// Creates a new role service.
    pub fn new(roles: Arc<dyn RoleStore>, permissions: Arc<dyn PermissionStore>) -> Self {
        Self { roles, permissions }
    }

    /// Lists every role (permission ids unresolved).
    pub async fn list(&self) -> AppResult<Vec<Role>> {
        self.roles.list().await
    }

    /// Gets a role with its permissions resolved.
    pub async fn get(&self, id: Uuid) -> AppResult<PopulatedRole> {
        let role = self.find(id).await?;
        self.populate(role).await
    }

    /// Creates a role with no permissions.
    pub async fn create(&self, data: CreateRole) -> AppResult<Role> {
        validation::not_blank(&data.description, "Description")?;
        if self.roles.find_by_name(&data.name).await?.is_some() {
            return Err(AppError::conflict("Role already exists"));
        }
        let role = self.roles.create(&data).await?;
        info!(role_id = %role.id, name = %role.name, "Role created");
        Ok(role)
    }

    /// Renames a role and/or changes its description.
    pub async fn update(&self, id: Uuid, data: UpdateRole) -> AppResult<PopulatedRole> {
        if let Some(description) = &data.description {
            validation::not_blank(description, "Description")?;
        }
        let current = self.find(id).await?;
        if let Some(name) = &data.name {
            if *name != current.name && self.roles.find_by_name(name).await?.is_some() {
                return Err(AppError::conflict("A role with that name already exists"));
            }
        }

        let role = self
            .roles
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Role not found"))?;
        info!(role_id = %id, name = %role.name, "Role updated");
        self.populate(role).await
    }

    /// Deletes a role. Users referencing it keep the dangling reference.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.roles.delete(id).await? {
            return Err(AppError::not_found("Role not found"));
        }
        info!(role_id = %id, "Role deleted");
        Ok(())
    }

    /// Adds permissions to a role. Every id must name an existing permission.
    pub async fn assign_permissions(
        &self,
        id: Uuid,
        permission_ids: &[Uuid],
    ) -> AppResult<PopulatedRole> {
        self.find(id).await?;

        let requested = dedup(permission_ids);
        let found = self.permissions.find_by_ids(&requested).await?;
        if found.len() != requested.len() {
            return Err(AppError::validation("Some permissions do not exist"));
        }

        let role = self
            .roles
            .add_permissions(id, &requested)
            .await?
            .ok_or_else(|| AppError::not_found("Role not found"))?;
        info!(role_id = %id, added = requested.len(), "Permissions assigned");
        self.populate(role).await
    }

    /// Removes permissions from a role. Ids the role does not hold are ignored.
    pub async fn unassign_permissions(
        &self,
        id: Uuid,
        permission_ids: &[Uuid],
    ) -> AppResult<PopulatedRole> {
        let role = self
            .roles
            .remove_permissions(id, &dedup(permission_ids))
            .await?
            .ok_or_else(|| AppError::not_found("Role not found"))?;
        info!(role_id = %id, "Permissions unassigned");
        self.populate(role).await
    }

    async fn find(&self, id: Uuid) -> AppResult<Role> {
        self.roles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Role not found"))
    }

    async fn populate(&self, role: Role) -> AppResult<PopulatedRole> {
        let mut permissions = self.permissions.find_by_ids(&role.permission_ids).await?;
        // Keep the role's assignment order.
        permissions.sort_by_key(|p| {
            role.permission_ids
                .iter()
                .position(|id| *id == p.id)
                .unwrap_or(usize::MAX)
        });
        Ok(PopulatedRole::new(role, permissions))
    }
}

/// Drop repeated ids, keeping first occurrences in order.
fn dedup(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
