//! Role entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::name::RoleName;
use crate::permission::Permission;

/// A named bundle of permissions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Unique, upper-case name.
    pub name: RoleName,
    /// Free-form description.
    pub description: String,
    /// Referenced permissions, without duplicates.
    pub permission_ids: Vec<Uuid>,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
    /// When the role was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Whether the role references the given permission id.
    pub fn references(&self, permission_id: &Uuid) -> bool {
        self.permission_ids.contains(permission_id)
    }
}

/// A role with its permission references resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulatedRole {
    /// Unique role identifier.
    pub id: Uuid,
    /// Unique, upper-case name.
    pub name: RoleName,
    /// Free-form description.
    pub description: String,
    /// Resolved permissions. References to deleted permissions are dropped.
    pub permissions: Vec<Permission>,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
    /// When the role was last updated.
    pub updated_at: DateTime<Utc>,
}

impl PopulatedRole {
    /// Combine a role with its resolved permissions.
    pub fn new(role: Role, permissions: Vec<Permission>) -> Self {
        Self {
            id: role.id,
            name: role.name,
            description: role.description,
            permissions,
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }
}

/// Data required to create a new role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRole {
    /// Role name.
    pub name: RoleName,
    /// Description.
    pub description: String,
}

/// Role fields that may be changed; `None` leaves the field as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRole {
    /// New name.
    pub name: Option<RoleName>,
    /// New description.
    pub description: Option<String>,
}
