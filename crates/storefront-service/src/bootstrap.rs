//! Default-data seeding run at startup.
//!
//! Every step looks before it writes, so running it against an already
//! seeded store changes nothing.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use storefront_auth::password::{PasswordHasher, PasswordValidator};
use storefront_core::config::RbacConfig;
use storefront_core::error::{AppError, ErrorKind};
use storefront_core::result::AppResult;
use storefront_database::Repositories;
use storefront_entity::permission::{CreatePermission, PermissionName};
use storefront_entity::role::{CreateRole, Role, RoleName};
use storefront_entity::user::CreateUser;

use crate::validation;

/// Permissions the HTTP routes check, with their descriptions.
pub const BUILTIN_PERMISSIONS: &[(&str, &str)] = &[
    ("users:read", "List and view user accounts"),
    ("users:update", "Edit other users and change their role"),
    ("users:delete", "Delete other users"),
    ("roles:read", "List and view roles"),
    ("roles:create", "Create roles"),
    ("roles:update", "Edit roles and assign permissions"),
    ("roles:delete", "Delete roles and unassign permissions"),
    ("permissions:read", "List and view permissions"),
    ("permissions:create", "Create permissions"),
    ("permissions:update", "Edit permissions"),
    ("permissions:delete", "Delete permissions"),
    ("products:create", "Add catalog products"),
    ("products:update", "Edit catalog products"),
    ("products:delete", "Delete catalog products"),
];

/// What a seeding run created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Built-in permissions that were missing.
    pub permissions_created: usize,
    /// Built-in roles that were missing.
    pub roles_created: usize,
    /// Whether the administrator account was created.
    pub admin_created: bool,
}

/// Seeds built-in permissions, roles, and the optional administrator.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    repos: Repositories,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    config: RbacConfig,
}

impl Bootstrap {
    /// Creates a bootstrapper over the given stores.
    pub fn new(
        repos: Repositories,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        config: RbacConfig,
    ) -> Self {
        Self {
            repos,
            hasher,
            validator,
            config,
        }
    }

    /// Runs every seeding step.
    pub async fn run(&self) -> AppResult<SeedReport> {
        let mut report = SeedReport::default();

        let mut permission_ids = Vec::with_capacity(BUILTIN_PERMISSIONS.len());
        let mut new_permission_ids = Vec::new();
        for (name, description) in BUILTIN_PERMISSIONS {
            let (id, created) = self.ensure_permission(name, description).await?;
            permission_ids.push(id);
            if created {
                new_permission_ids.push(id);
            }
        }
        report.permissions_created = new_permission_ids.len();

        let (admin_role, created) = self
            .ensure_role(&self.config.admin_role, "Full administrative access")
            .await?;
        report.roles_created += usize::from(created);

        // An existing admin role only gains permissions introduced by this
        // run; grants an operator revoked stay revoked.
        let grants = if created {
            &permission_ids
        } else {
            &new_permission_ids
        };
        if !grants.is_empty() {
            self.repos.roles.add_permissions(admin_role.id, grants).await?;
        }

        let (_, created) = self
            .ensure_role(&self.config.default_role, "Registered customer")
            .await?;
        report.roles_created += usize::from(created);

        report.admin_created = self.ensure_admin(admin_role.id).await?;

        info!(
            permissions_created = report.permissions_created,
            roles_created = report.roles_created,
            admin_created = report.admin_created,
            "Default RBAC data seeded"
        );
        Ok(report)
    }

    async fn ensure_permission(&self, name: &str, description: &str) -> AppResult<(Uuid, bool)> {
        let name = PermissionName::parse(name)?;
        if let Some(existing) = self.repos.permissions.find_by_name(&name).await? {
            return Ok((existing.id, false));
        }
        let created = self
            .repos
            .permissions
            .create(&CreatePermission {
                name,
                description: description.to_string(),
            })
            .await?;
        Ok((created.id, true))
    }

    async fn ensure_role(&self, name: &str, description: &str) -> AppResult<(Role, bool)> {
        let name = RoleName::parse(name)?;
        if let Some(existing) = self.repos.roles.find_by_name(&name).await? {
            return Ok((existing, false));
        }
        let role = self
            .repos
            .roles
            .create(&CreateRole {
                name,
                description: description.to_string(),
            })
            .await?;
        Ok((role, true))
    }

    async fn ensure_admin(&self, admin_role_id: Uuid) -> AppResult<bool> {
        let (Some(email), Some(password)) = (&self.config.admin_email, &self.config.admin_password)
        else {
            return Ok(false);
        };

        validation::email(email)?;
        self.validator.validate(password)?;

        if self.repos.users.find_by_email(email).await?.is_some() {
            return Ok(false);
        }

        let password_hash = self.hasher.hash_password(password)?;
        let created = self
            .repos
            .users
            .create(&CreateUser {
                username: self.config.admin_username.clone(),
                email: email.trim().to_string(),
                password_hash,
                role_id: admin_role_id,
            })
            .await;

        match created {
            Ok(user) => {
                info!(user_id = %user.id, "Administrator account created");
                Ok(true)
            }
            // Another instance seeded it first.
            Err(AppError {
                kind: ErrorKind::Conflict,
                ..
            }) => {
                warn!("Administrator account already exists");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use storefront_core::config::AuthConfig;

    use super::*;

    fn bootstrap(repos: &Repositories, config: RbacConfig) -> Bootstrap {
        Bootstrap::new(
            repos.clone(),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&AuthConfig::default())),
            config,
        )
    }

    fn with_admin() -> RbacConfig {
        RbacConfig {
            admin_email: Some("admin@example.com".to_string()),
            admin_password: Some("changeme".to_string()),
            ..RbacConfig::default()
        }
    }

    #[tokio::test]
    async fn test_seeds_roles_and_permissions() {
        let repos = Repositories::in_memory();
        let report = bootstrap(&repos, with_admin()).run().await.unwrap();

        assert_eq!(report.permissions_created, BUILTIN_PERMISSIONS.len());
        assert_eq!(report.roles_created, 2);
        assert!(report.admin_created);

        let admin = repos
            .roles
            .find_by_name(&RoleName::parse("ADMIN").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.permission_ids.len(), BUILTIN_PERMISSIONS.len());

        let user = repos
            .roles
            .find_by_name(&RoleName::parse("USER").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(user.permission_ids.is_empty());

        let account = repos
            .users
            .find_by_email("admin@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.role_id, admin.id);
    }

    #[tokio::test]
    async fn test_second_run_is_a_no_op() {
        let repos = Repositories::in_memory();
        bootstrap(&repos, with_admin()).run().await.unwrap();
        let report = bootstrap(&repos, with_admin()).run().await.unwrap();
        assert_eq!(report, SeedReport::default());
        assert_eq!(repos.roles.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_rerun_keeps_revoked_admin_permission_revoked() {
        let repos = Repositories::in_memory();
        bootstrap(&repos, with_admin()).run().await.unwrap();

        let admin_name = RoleName::parse("ADMIN").unwrap();
        let admin = repos.roles.find_by_name(&admin_name).await.unwrap().unwrap();
        let products_delete = repos
            .permissions
            .find_by_name(&PermissionName::parse("products:delete").unwrap())
            .await
            .unwrap()
            .unwrap();
        repos
            .roles
            .remove_permissions(admin.id, &[products_delete.id])
            .await
            .unwrap();

        bootstrap(&repos, with_admin()).run().await.unwrap();

        let admin = repos.roles.find_by_name(&admin_name).await.unwrap().unwrap();
        assert!(!admin.references(&products_delete.id));
        assert_eq!(admin.permission_ids.len(), BUILTIN_PERMISSIONS.len() - 1);
    }

    #[tokio::test]
    async fn test_new_builtin_permission_is_granted_to_existing_admin() {
        let repos = Repositories::in_memory();
        bootstrap(&repos, with_admin()).run().await.unwrap();

        let users_read = repos
            .permissions
            .find_by_name(&PermissionName::parse("users:read").unwrap())
            .await
            .unwrap()
            .unwrap();
        repos.permissions.delete(users_read.id).await.unwrap();

        let report = bootstrap(&repos, with_admin()).run().await.unwrap();
        assert_eq!(report.permissions_created, 1);

        let admin = repos
            .roles
            .find_by_name(&RoleName::parse("ADMIN").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.permission_ids.len(), BUILTIN_PERMISSIONS.len());
    }

    #[tokio::test]
    async fn test_admin_account_needs_credentials() {
        let repos = Repositories::in_memory();
        let report = bootstrap(&repos, RbacConfig::default()).run().await.unwrap();
        assert!(!report.admin_created);
        assert!(repos.users.list().await.unwrap().is_empty());
    }
}
