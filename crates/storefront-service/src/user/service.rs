//! User lookup, profile updates, deletion, and role assignment.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_database::{RoleStore, UserStore};
use storefront_entity::role::{Role, RoleName};
use storefront_entity::user::{UpdateUser, User};

use crate::validation;

/// A user together with the role it references.
///
/// `role` is `None` when the reference dangles.
#[derive(Debug, Clone)]
pub struct UserWithRole {
    /// The user record.
    pub user: User,
    /// The referenced role, if it still exists.
    pub role: Option<Role>,
}

/// Handles user reads and writes.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    roles: Arc<dyn RoleStore>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>, roles: Arc<dyn RoleStore>) -> Self {
        Self { users, roles }
    }

    /// Gets a user with its role.
    pub async fn get(&self, id: Uuid) -> AppResult<UserWithRole> {
        let user = self.find(id).await?;
        self.with_role(user).await
    }

    /// Lists every user with its role.
    pub async fn list(&self) -> AppResult<Vec<UserWithRole>> {
        let roles: HashMap<Uuid, Role> = self
            .roles
            .list()
            .await?
            .into_iter()
            .map(|r| (r.id, r))
            .collect();

        Ok(self
            .users
            .list()
            .await?
            .into_iter()
            .map(|user| {
                let role = roles.get(&user.role_id).cloned();
                UserWithRole { user, role }
            })
            .collect())
    }

    /// Updates username and/or email.
    pub async fn update(&self, id: Uuid, data: UpdateUser) -> AppResult<UserWithRole> {
        if let Some(username) = &data.username {
            validation::not_blank(username, "Username")?;
        }
        if let Some(email) = &data.email {
            validation::email(email)?;
            if let Some(existing) = self.users.find_by_email(email).await? {
                if existing.id != id {
                    return Err(AppError::conflict("Email is already registered"));
                }
            }
        }

        let data = UpdateUser {
            username: data.username.map(|u| u.trim().to_string()),
            email: data.email.map(|e| e.trim().to_string()),
        };
        let user = self
            .users
            .update_profile(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %id, "User updated");
        self.with_role(user).await
    }

    /// Deletes a user.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.users.delete(id).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Points a user at the role named `role_name` (case-insensitive).
    pub async fn assign_role(&self, id: Uuid, role_name: &str) -> AppResult<UserWithRole> {
        if role_name.trim().is_empty() {
            return Err(AppError::validation("The 'roleName' field is required"));
        }
        let name = RoleName::parse(role_name)?;
        let role = self
            .roles
            .find_by_name(&name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("The role '{role_name}' does not exist")))?;

        let user = self
            .users
            .update_role(id, role.id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %id, role = %role.name, "User role changed");
        Ok(UserWithRole {
            user,
            role: Some(role),
        })
    }

    async fn find(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    async fn with_role(&self, user: User) -> AppResult<UserWithRole> {
        let role = self.roles.find_by_id(user.role_id).await?;
        Ok(UserWithRole { user, role })
    }
}
