//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use storefront_auth::jwt::{JwtDecoder, JwtEncoder};
use storefront_auth::password::{PasswordHasher, PasswordValidator};
use storefront_auth::rbac::{AuthorizationResolver, RbacEnforcer};
use storefront_auth::CredentialVerifier;
use storefront_core::config::AppConfig;
use storefront_database::Repositories;
use storefront_service::{
    AuthService, Bootstrap, PermissionService, ProductService, RoleService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Backing stores
    pub repos: Repositories,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer credential verifier
    pub credential_verifier: Arc<CredentialVerifier>,
    /// Role/permission resolver
    pub authorization_resolver: Arc<AuthorizationResolver>,
    /// Gate decision logic
    pub rbac_enforcer: Arc<RbacEnforcer>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,
    /// Password policy
    pub password_validator: Arc<PasswordValidator>,

    // ── Services ─────────────────────────────────────────────
    /// Registration, login, and password changes
    pub auth_service: Arc<AuthService>,
    /// User administration
    pub user_service: Arc<UserService>,
    /// Role administration
    pub role_service: Arc<RoleService>,
    /// Permission administration
    pub permission_service: Arc<PermissionService>,
    /// Product catalog
    pub product_service: Arc<ProductService>,
}

impl AppState {
    /// Wire every dependency from configuration and the chosen stores.
    pub fn new(config: AppConfig, repos: Repositories) -> Self {
        let password_hasher = Arc::new(PasswordHasher::new());
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));

        let credential_verifier = Arc::new(CredentialVerifier::new(
            JwtDecoder::new(&config.auth),
            Arc::clone(&repos.users),
        ));
        let authorization_resolver = Arc::new(AuthorizationResolver::new(
            Arc::clone(&repos.roles),
            Arc::clone(&repos.permissions),
        ));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&repos.users),
            Arc::clone(&repos.roles),
            Arc::clone(&password_hasher),
            Arc::clone(&password_validator),
            jwt_encoder,
            config.rbac.default_role.clone(),
        ));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&repos.users),
            Arc::clone(&repos.roles),
        ));
        let role_service = Arc::new(RoleService::new(
            Arc::clone(&repos.roles),
            Arc::clone(&repos.permissions),
        ));
        let permission_service = Arc::new(PermissionService::new(Arc::clone(&repos.permissions)));
        let product_service = Arc::new(ProductService::new(Arc::clone(&repos.products)));

        Self {
            config: Arc::new(config),
            repos,
            credential_verifier,
            authorization_resolver,
            rbac_enforcer: Arc::new(RbacEnforcer::new()),
            password_hasher,
            password_validator,
            auth_service,
            user_service,
            role_service,
            permission_service,
            product_service,
        }
    }

    /// A bootstrapper sharing this state's stores and password policy.
    pub fn bootstrap(&self) -> Bootstrap {
        Bootstrap::new(
            self.repos.clone(),
            Arc::clone(&self.password_hasher),
            Arc::clone(&self.password_validator),
            self.config.rbac.clone(),
        )
    }
}
