//! Response DTOs.
//!
//! Every body is wrapped in [`storefront_core::types::ApiResponse`]; the
//! structs here are the `payload` shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_entity::permission::Permission;
use storefront_entity::product::Product;
use storefront_entity::role::{PopulatedRole, Role};
use storefront_service::UserWithRole;
use storefront_service::auth::AuthSession;

/// Role without its permissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSummary {
    /// Role ID.
    pub id: Uuid,
    /// Upper-case name.
    pub name: String,
    /// Description.
    pub description: String,
}

impl From<&Role> for RoleSummary {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.to_string(),
            description: role.description.clone(),
        }
    }
}

/// User as returned by the API. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub username: String,
    /// Email.
    pub email: String,
    /// The user's role; `null` when the reference dangles.
    pub role: Option<RoleSummary>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<UserWithRole> for UserResponse {
    fn from(value: UserWithRole) -> Self {
        Self {
            id: value.user.id,
            username: value.user.username,
            email: value.user.email,
            role: value.role.as_ref().map(RoleSummary::from),
            created_at: value.user.created_at,
            updated_at: value.user.updated_at,
        }
    }
}

/// User summary embedded in auth responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUserSummary {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub username: String,
    /// Email.
    pub email: String,
    /// Role name.
    pub role: Option<String>,
}

/// Payload of register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Bearer token.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// The signed-in user.
    pub user: AuthUserSummary,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token.token,
            expires_at: session.token.expires_at,
            user: AuthUserSummary {
                id: session.user.id,
                username: session.user.username,
                email: session.user.email,
                role: session.role_name.map(String::from),
            },
        }
    }
}

/// Permission as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionResponse {
    /// Permission ID.
    pub id: Uuid,
    /// Name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<Permission> for PermissionResponse {
    fn from(p: Permission) -> Self {
        Self {
            id: p.id,
            name: p.name.into(),
            description: p.description,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Role with permission ids, as listed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    /// Role ID.
    pub id: Uuid,
    /// Upper-case name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Referenced permission ids.
    pub permissions: Vec<Uuid>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name.into(),
            description: role.description,
            permissions: role.permission_ids,
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }
}

/// Role with its permissions resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedRoleResponse {
    /// Role ID.
    pub id: Uuid,
    /// Upper-case name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Resolved permissions.
    pub permissions: Vec<PermissionResponse>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<PopulatedRole> for PopulatedRoleResponse {
    fn from(role: PopulatedRole) -> Self {
        Self {
            id: role.id,
            name: role.name.into(),
            description: role.description,
            permissions: role.permissions.into_iter().map(Into::into).collect(),
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }
}

/// `{ "user": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    /// The user.
    pub user: UserResponse,
}

/// `{ "users": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersPayload {
    /// The users.
    pub users: Vec<UserResponse>,
}

/// `{ "role": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePayload<R> {
    /// The role.
    pub role: R,
}

/// `{ "roles": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolesPayload {
    /// The roles.
    pub roles: Vec<RoleResponse>,
}

/// `{ "permission": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionPayload {
    /// The permission.
    pub permission: PermissionResponse,
}

/// `{ "permissions": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionsPayload {
    /// The permissions.
    pub permissions: Vec<PermissionResponse>,
}

/// `{ "product": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPayload {
    /// The product.
    pub product: Product,
}

/// `{ "products": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsPayload {
    /// The products.
    pub products: Vec<Product>,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Active store provider.
    pub store: String,
}
