//! Loads the role and permission set behind a principal.

use std::sync::Arc;

use tracing::debug;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_database::{PermissionStore, RoleStore};

use super::context::AuthorizationContext;
use crate::credential::Principal;

/// Resolves a [`Principal`] into its [`AuthorizationContext`].
#[derive(Clone)]
pub struct AuthorizationResolver {
    roles: Arc<dyn RoleStore>,
    permissions: Arc<dyn PermissionStore>,
}

impl std::fmt::Debug for AuthorizationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationResolver").finish_non_exhaustive()
    }
}

impl AuthorizationResolver {
    /// Create a resolver over the role and permission stores.
    pub fn new(roles: Arc<dyn RoleStore>, permissions: Arc<dyn PermissionStore>) -> Self {
        Self { roles, permissions }
    }

    /// Load the principal's role and the permissions it references.
    ///
    /// A role reference that no longer resolves is a data-integrity
    /// failure and comes back as an internal error, never as a denial.
    /// Permission references that no longer resolve are skipped.
    pub async fn load(&self, principal: &Principal) -> AppResult<AuthorizationContext> {
        let role = self
            .roles
            .find_by_id(principal.role_id)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Role {} referenced by user {} does not exist",
                    principal.role_id, principal.id
                ))
            })?;

        let permissions = self.permissions.find_by_ids(&role.permission_ids).await?;
        let context = AuthorizationContext::new(role, permissions.iter().collect());

        debug!(
            user_id = %principal.id,
            role = %context.role.name,
            permissions = context.permissions.len(),
            "Authorization context loaded"
        );
        Ok(context)
    }
}
