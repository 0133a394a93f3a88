//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use storefront_core::error::AppError;
use storefront_entity::permission::{CreatePermission, PermissionName, UpdatePermission};
use storefront_entity::product::model::DEFAULT_PRODUCT_IMAGE;
use storefront_entity::product::{CreateProduct, UpdateProduct};
use storefront_entity::role::{CreateRole, RoleName, UpdateRole};
use storefront_entity::user::UpdateUser;
use storefront_service::auth::RegisterRequest as SvcRegister;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, message = "All fields are required"))]
    pub username: String,
    /// Email.
    #[validate(length(min = 1, message = "All fields are required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "All fields are required"))]
    pub password: String,
}

impl From<RegisterRequest> for SvcRegister {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "You must provide the current and new password"))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 1, message = "You must provide the current and new password"))]
    pub new_password: String,
}

/// Profile update request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New username.
    pub username: Option<String>,
    /// New email.
    pub email: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
        }
    }
}

/// Role reassignment request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRoleRequest {
    /// Target role name (case-insensitive).
    #[validate(length(min = 1, message = "The 'roleName' field is required"))]
    pub role_name: String,
}

/// Role creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoleRequest {
    /// Role name; stored upper-cased.
    #[validate(length(min = 1, message = "Name and description are required"))]
    pub name: String,
    /// Description.
    #[validate(length(min = 1, message = "Name and description are required"))]
    pub description: String,
}

impl TryFrom<CreateRoleRequest> for CreateRole {
    type Error = AppError;

    fn try_from(req: CreateRoleRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: RoleName::parse(&req.name)?,
            description: req.description,
        })
    }
}

/// Role update request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

impl TryFrom<UpdateRoleRequest> for UpdateRole {
    type Error = AppError;

    fn try_from(req: UpdateRoleRequest) -> Result<Self, Self::Error> {
        let name = req
            .name
            .map(|n| RoleName::parse(&n).map_err(|_| AppError::validation("Name cannot be empty")))
            .transpose()?;
        Ok(Self {
            name,
            description: req.description,
        })
    }
}

/// Permission ids to assign to or remove from a role.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RolePermissionsRequest {
    /// Permission ids.
    pub permissions: Vec<Uuid>,
}

/// Permission creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePermissionRequest {
    /// Permission name, conventionally `resource:action`.
    #[validate(length(min = 1, message = "Name and description are required"))]
    pub name: String,
    /// Description.
    #[validate(length(min = 1, message = "Name and description are required"))]
    pub description: String,
}

impl TryFrom<CreatePermissionRequest> for CreatePermission {
    type Error = AppError;

    fn try_from(req: CreatePermissionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: PermissionName::parse(&req.name)?,
            description: req.description,
        })
    }
}

/// Permission update request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePermissionRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

impl TryFrom<UpdatePermissionRequest> for UpdatePermission {
    type Error = AppError;

    fn try_from(req: UpdatePermissionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: req.name.as_deref().map(PermissionName::parse).transpose()?,
            description: req.description,
        })
    }
}

/// Product creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    /// Product name.
    #[validate(length(min = 1, message = "Name, description and price are required"))]
    pub name: String,
    /// Product description.
    #[validate(length(min = 1, message = "Name, description and price are required"))]
    pub description: String,
    /// Unit price.
    pub price: f64,
    /// Units in stock; zero when omitted.
    pub stock: Option<i32>,
    /// Image reference.
    pub image: Option<String>,
}

impl From<CreateProductRequest> for CreateProduct {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
            stock: req.stock.unwrap_or(0),
            image: req
                .image
                .filter(|i| !i.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE.to_string()),
        }
    }
}

/// Product update request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New price.
    pub price: Option<f64>,
    /// New stock level.
    pub stock: Option<i32>,
    /// New image reference.
    pub image: Option<String>,
    /// Whether the product is listed.
    pub is_active: Option<bool>,
}

impl From<UpdateProductRequest> for UpdateProduct {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
            stock: req.stock,
            image: req.image,
            is_active: req.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_password_uses_camel_case() {
        let req: ChangePasswordRequest = serde_json::from_value(serde_json::json!({
            "currentPassword": "old",
            "newPassword": "new-secret"
        }))
        .unwrap();
        assert_eq!(req.current_password, "old");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_role_normalizes_name() {
        let role = CreateRole::try_from(CreateRoleRequest {
            name: "editor".to_string(),
            description: "Edits".to_string(),
        })
        .unwrap();
        assert_eq!(role.name.as_str(), "EDITOR");
    }

    #[test]
    fn test_create_product_defaults() {
        let product = CreateProduct::from(CreateProductRequest {
            name: "Mug".to_string(),
            description: "Ceramic".to_string(),
            price: 4.5,
            stock: None,
            image: None,
        });
        assert_eq!(product.stock, 0);
        assert_eq!(product.image, DEFAULT_PRODUCT_IMAGE);
    }

    #[test]
    fn test_blank_fields_fail_validation() {
        let req = CreateRoleRequest {
            name: String::new(),
            description: "x".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
