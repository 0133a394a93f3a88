//! Permission gates layered on individual routes.
//!
//! Both gates expect the authorization gate to have run and attached a
//! [`Principal`]. The resolved [`AuthorizationContext`] is cached in the
//! request extensions so a request pays for at most one resolution.

use axum::extract::{RawPathParams, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use storefront_auth::{AuthorizationContext, Principal};
use storefront_core::error::AppError;

use crate::state::AppState;

/// State handed to a gate: the shared app state plus the permission the
/// route demands.
#[derive(Debug, Clone)]
pub struct PermissionGate {
    /// Shared application state.
    pub app: AppState,
    /// Permission name required by the route.
    pub required: &'static str,
}

impl PermissionGate {
    /// Gate requiring `required`.
    pub fn new(app: &AppState, required: &'static str) -> Self {
        Self {
            app: app.clone(),
            required,
        }
    }
}

/// Allow only when the caller's role grants the required permission.
pub async fn require_permission(
    State(gate): State<PermissionGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let enforcer = &gate.app.rbac_enforcer;
    let principal = request
        .extensions()
        .get::<Principal>()
        .cloned()
        .ok_or_else(|| enforcer.not_authenticated())?;

    let context = authorization_context(&gate.app, &principal, &mut request).await?;
    enforcer.require_permission(&principal, &context, gate.required)?;

    debug!(
        user_id = %principal.id,
        role = context.role_name(),
        required = gate.required,
        "Permission granted"
    );
    Ok(next.run(request).await)
}

/// Allow when the caller targets their own record (`{id}` path parameter),
/// otherwise require the permission.
pub async fn require_owner_or_permission(
    State(gate): State<PermissionGate>,
    params: RawPathParams,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let enforcer = &gate.app.rbac_enforcer;
    let principal = request
        .extensions()
        .get::<Principal>()
        .cloned()
        .ok_or_else(|| enforcer.not_authenticated())?;

    let target = params
        .iter()
        .find(|(name, _)| *name == "id")
        .map(|(_, value)| value);

    if enforcer.is_owner(&principal, target) {
        debug!(user_id = %principal.id, "Owner access granted");
        return Ok(next.run(request).await);
    }

    let context = authorization_context(&gate.app, &principal, &mut request).await?;
    enforcer.require_permission_for_other(&principal, &context, gate.required)?;

    debug!(
        user_id = %principal.id,
        role = context.role_name(),
        required = gate.required,
        "Cross-user access granted"
    );
    Ok(next.run(request).await)
}

/// The request's authorization context, resolved on first use.
async fn authorization_context(
    state: &AppState,
    principal: &Principal,
    request: &mut Request,
) -> Result<AuthorizationContext, AppError> {
    if let Some(context) = request.extensions().get::<AuthorizationContext>() {
        return Ok(context.clone());
    }

    let context = state
        .authorization_resolver
        .load(principal)
        .await
        .map_err(|err| state.rbac_enforcer.resolution_failure(err))?;
    request.extensions_mut().insert(context.clone());
    Ok(context)
}
