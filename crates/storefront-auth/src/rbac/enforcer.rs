//! Gate decisions.

use tracing::{error, warn};

use storefront_core::error::{AppError, ErrorKind};
use storefront_core::result::AppResult;

use super::context::AuthorizationContext;
use crate::credential::Principal;

/// Message of the 500 response for a failed role/permission lookup.
pub const RESOLUTION_FAILURE: &str = "Error checking permissions";

/// Decides the outcome of the permission and owner-or-permission gates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RbacEnforcer;

impl RbacEnforcer {
    /// Creates a new enforcer.
    pub fn new() -> Self {
        Self
    }

    /// Allow when the context grants `required`, otherwise 403 naming it.
    pub fn require_permission(
        &self,
        principal: &Principal,
        context: &AuthorizationContext,
        required: &str,
    ) -> AppResult<()> {
        if context.has_permission(required) {
            return Ok(());
        }
        warn!(user_id = %principal.id, required, "Permission denied");
        Err(AppError::forbidden(format!(
            "You do not have permission to perform this action. Required permission: {required}"
        )))
    }

    /// Whether the principal is acting on its own record.
    ///
    /// Self-action wins regardless of permission state, so callers check
    /// this before loading any context.
    pub fn is_owner(&self, principal: &Principal, target: Option<&str>) -> bool {
        target.is_some_and(|t| principal.is_target(t))
    }

    /// The non-owner branch of the owner-or-permission gate.
    pub fn require_permission_for_other(
        &self,
        principal: &Principal,
        context: &AuthorizationContext,
        required: &str,
    ) -> AppResult<()> {
        if context.has_permission(required) {
            return Ok(());
        }
        warn!(user_id = %principal.id, required, "Cross-user action denied");
        Err(AppError::forbidden(format!(
            "You cannot modify or delete another user without sufficient permissions. \
             You need the permission: {required}"
        )))
    }

    /// 401 for a gate reached without a principal.
    pub fn not_authenticated(&self) -> AppError {
        AppError::unauthorized("User not authenticated")
    }

    /// Convert a failed context load into the 500 reported by the gates.
    pub fn resolution_failure(&self, err: AppError) -> AppError {
        error!(error = %err, "{RESOLUTION_FAILURE}");
        let detail = err.message.clone();
        AppError::with_source(ErrorKind::Internal, RESOLUTION_FAILURE, err).with_detail(detail)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use storefront_entity::permission::PermissionName;
    use storefront_entity::role::{Role, RoleName};

    use super::*;

    fn context(role: &str, names: &[&str]) -> AuthorizationContext {
        let now = Utc::now();
        AuthorizationContext::new(
            Role {
                id: Uuid::new_v4(),
                name: RoleName::parse(role).unwrap(),
                description: String::new(),
                permission_ids: Vec::new(),
                created_at: now,
                updated_at: now,
            },
            names
                .iter()
                .map(|n| PermissionName::parse(n).unwrap())
                .collect(),
        )
    }

    fn principal() -> Principal {
        Principal {
            id: Uuid::new_v4(),
            username: "u".to_string(),
            email: "u@example.com".to_string(),
            role_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_editor_scenario() {
        let enforcer = RbacEnforcer::new();
        let u1 = principal();
        let editor = context("EDITOR", &["products:update"]);

        assert!(enforcer.require_permission(&u1, &editor, "products:update").is_ok());

        let err = enforcer
            .require_permission(&u1, &editor, "products:delete")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert!(err.message.contains("Required permission: products:delete"));
    }

    #[test]
    fn test_decisions_are_repeatable() {
        let enforcer = RbacEnforcer::new();
        let p = principal();
        let ctx = context("USER", &["users:read"]);
        for _ in 0..3 {
            assert!(enforcer.require_permission(&p, &ctx, "users:read").is_ok());
            assert!(enforcer.require_permission(&p, &ctx, "users:write").is_err());
        }
    }

    #[test]
    fn test_owner_check() {
        let enforcer = RbacEnforcer::new();
        let p = principal();
        assert!(enforcer.is_owner(&p, Some(&p.id.to_string())));
        assert!(!enforcer.is_owner(&p, Some(&Uuid::new_v4().to_string())));
        assert!(!enforcer.is_owner(&p, None));
    }

    #[test]
    fn test_cross_user_denial_names_permission() {
        let enforcer = RbacEnforcer::new();
        let err = enforcer
            .require_permission_for_other(&principal(), &context("USER", &[]), "users:update")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert!(err.message.ends_with("users:update"));
    }

    #[test]
    fn test_resolution_failure_is_500_with_detail() {
        let err = RbacEnforcer::new().resolution_failure(AppError::internal("role gone"));
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.message, RESOLUTION_FAILURE);
        assert_eq!(err.detail.as_deref(), Some("role gone"));
    }
}
