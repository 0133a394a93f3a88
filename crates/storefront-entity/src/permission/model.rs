//! Permission entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::name::PermissionName;

/// A named, atomic capability that roles can hold.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Permission {
    /// Unique permission identifier.
    pub id: Uuid,
    /// Unique name, e.g. `users:update`.
    pub name: PermissionName,
    /// Free-form description.
    pub description: String,
    /// When the permission was created.
    pub created_at: DateTime<Utc>,
    /// When the permission was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new permission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePermission {
    /// Permission name.
    pub name: PermissionName,
    /// Description.
    pub description: String,
}

/// Permission fields that may be changed; `None` leaves the field as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePermission {
    /// New name.
    pub name: Option<PermissionName>,
    /// New description.
    pub description: Option<String>,
}
