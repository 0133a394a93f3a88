//! The per-request authorization context.

use storefront_entity::role::Role;

use super::permission_set::PermissionSet;

/// A principal's role together with the permissions it grants.
///
/// Built once per request by [`super::AuthorizationResolver::load`] and
/// consulted by every gate on that request.
#[derive(Debug, Clone)]
pub struct AuthorizationContext {
    /// The principal's role.
    pub role: Role,
    /// Names of the permissions the role grants.
    pub permissions: PermissionSet,
}

impl AuthorizationContext {
    /// Combine a role with its resolved permission set.
    pub fn new(role: Role, permissions: PermissionSet) -> Self {
        Self { role, permissions }
    }

    /// Whether the role grants `name` (exact match).
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.contains(name)
    }

    /// The role's name.
    pub fn role_name(&self) -> &str {
        self.role.name.as_str()
    }
}
