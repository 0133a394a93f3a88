//! Store traits implemented by every persistence provider.
//!
//! Uniqueness (user email, role name, permission name) is enforced by the
//! provider at write time and reported as `ErrorKind::Conflict`. Methods
//! that target a single record by id return `Ok(None)`/`Ok(false)` when it
//! does not exist.

use async_trait::async_trait;
use uuid::Uuid;

use storefront_core::result::AppResult;
use storefront_entity::permission::{CreatePermission, Permission, PermissionName, UpdatePermission};
use storefront_entity::product::{CreateProduct, Product, UpdateProduct};
use storefront_entity::role::{CreateRole, Role, RoleName, UpdateRole};
use storefront_entity::user::{CreateUser, UpdateUser, User};

/// User persistence.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List all users, oldest first.
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Create a user. Fails with a conflict when the email is taken.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Update profile fields. Fails with a conflict when the new email is taken.
    async fn update_profile(&self, id: Uuid, data: &UpdateUser) -> AppResult<Option<User>>;

    /// Replace the stored password hash.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<bool>;

    /// Point the user at a different role.
    async fn update_role(&self, id: Uuid, role_id: Uuid) -> AppResult<Option<User>>;

    /// Delete a user.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Role persistence.
#[async_trait]
pub trait RoleStore: Send + Sync + 'static {
    /// Find a role by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>>;

    /// Find a role by its normalized name.
    async fn find_by_name(&self, name: &RoleName) -> AppResult<Option<Role>>;

    /// List all roles, oldest first.
    async fn list(&self) -> AppResult<Vec<Role>>;

    /// Create a role with no permissions. Fails with a conflict when the name is taken.
    async fn create(&self, data: &CreateRole) -> AppResult<Role>;

    /// Update name and/or description. Fails with a conflict when the new name is taken.
    async fn update(&self, id: Uuid, data: &UpdateRole) -> AppResult<Option<Role>>;

    /// Delete a role. Users still pointing at it are left untouched.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Add permission references (set union; already present ids are skipped).
    async fn add_permissions(&self, id: Uuid, permission_ids: &[Uuid]) -> AppResult<Option<Role>>;

    /// Remove permission references (set difference; absent ids are ignored).
    async fn remove_permissions(
        &self,
        id: Uuid,
        permission_ids: &[Uuid],
    ) -> AppResult<Option<Role>>;
}

/// Permission persistence.
#[async_trait]
pub trait PermissionStore: Send + Sync + 'static {
    /// Find a permission by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Permission>>;

    /// Find a permission by exact name.
    async fn find_by_name(&self, name: &PermissionName) -> AppResult<Option<Permission>>;

    /// Fetch every permission among `ids` that exists, ignoring the rest.
    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Permission>>;

    /// List all permissions, oldest first.
    async fn list(&self) -> AppResult<Vec<Permission>>;

    /// Create a permission. Fails with a conflict when the name is taken.
    async fn create(&self, data: &CreatePermission) -> AppResult<Permission>;

    /// Update name and/or description. Fails with a conflict when the new name is taken.
    async fn update(&self, id: Uuid, data: &UpdatePermission) -> AppResult<Option<Permission>>;

    /// Delete a permission and drop it from every role that references it.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Product catalog persistence.
#[async_trait]
pub trait ProductStore: Send + Sync + 'static {
    /// List products whose `is_active` flag is set, oldest first.
    async fn list_active(&self) -> AppResult<Vec<Product>>;

    /// Find a product by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>>;

    /// Create a product.
    async fn create(&self, data: &CreateProduct) -> AppResult<Product>;

    /// Update product fields.
    async fn update(&self, id: Uuid, data: &UpdateProduct) -> AppResult<Option<Product>>;

    /// Delete a product.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
