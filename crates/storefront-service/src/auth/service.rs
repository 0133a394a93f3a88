//! Account authentication operations.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use storefront_auth::jwt::{IssuedToken, JwtEncoder};
use storefront_auth::password::{PasswordHasher, PasswordValidator};
use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_database::{RoleStore, UserStore};
use storefront_entity::role::RoleName;
use storefront_entity::user::{CreateUser, User};

use crate::validation;

/// Input for self-registration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub username: String,
    /// Contact address, unique across accounts.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// The outcome of a successful registration or login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The authenticated user.
    pub user: User,
    /// Name of the user's role, when it still exists.
    pub role_name: Option<RoleName>,
    /// Bearer token for subsequent requests.
    pub token: IssuedToken,
}

/// Handles registration, login, and password changes.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    roles: Arc<dyn RoleStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    /// Role assigned to self-registered users.
    default_role: String,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("default_role", &self.default_role)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        roles: Arc<dyn RoleStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        default_role: impl Into<String>,
    ) -> Self {
        Self {
            users,
            roles,
            hasher,
            validator,
            encoder,
            default_role: default_role.into(),
        }
    }

    /// Registers a new account with the default role and signs it in.
    pub async fn register(&self, req: RegisterRequest) -> AppResult<AuthSession> {
        validation::not_blank(&req.username, "Username")?;
        validation::email(&req.email)?;
        self.validator.validate(&req.password)?;

        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::conflict("User already exists"));
        }

        let role_name = RoleName::parse(&self.default_role)?;
        let role = self.roles.find_by_name(&role_name).await?.ok_or_else(|| {
            AppError::internal(format!(
                "Error: {role_name} role does not exist in the database"
            ))
        })?;

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .users
            .create(&CreateUser {
                username: req.username.trim().to_string(),
                email: req.email.trim().to_string(),
                password_hash,
                role_id: role.id,
            })
            .await?;

        info!(user_id = %user.id, role = %role.name, "User registered");

        let token = self.encoder.issue(user.id)?;
        Ok(AuthSession {
            user,
            role_name: Some(role.name),
            token,
        })
    }

    /// Verifies credentials and issues a token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let role_name = self.roles.find_by_id(user.role_id).await?.map(|r| r.name);
        let token = self.encoder.issue(user.id)?;

        info!(user_id = %user.id, "User logged in");
        Ok(AuthSession {
            user,
            role_name,
            token,
        })
    }

    /// Changes a user's password after checking the current one.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        if current_password.is_empty() || new_password.is_empty() {
            return Err(AppError::validation(
                "You must provide the current and new password",
            ));
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !self
            .hasher
            .verify_password(current_password, &user.password_hash)?
        {
            return Err(AppError::validation("Current password is incorrect"));
        }

        self.validator.validate_new(new_password)?;

        let new_hash = self.hasher.hash_password(new_password)?;
        if !self.users.update_password(user_id, &new_hash).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use storefront_core::config::AuthConfig;
    use storefront_core::error::ErrorKind;
    use storefront_database::MemoryStore;
    use storefront_entity::role::CreateRole;

    use super::*;

    async fn service(with_user_role: bool) -> (AuthService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        if with_user_role {
            RoleStore::create(
                store.as_ref(),
                &CreateRole {
                    name: RoleName::parse("USER").unwrap(),
                    description: "Default role".to_string(),
                },
            )
            .await
            .unwrap();
        }
        let config = AuthConfig::default();
        let service = AuthService::new(
            store.clone(),
            store.clone(),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config)),
            Arc::new(JwtEncoder::new(&config)),
            "USER",
        );
        (service, store)
    }

    fn request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: "alice".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_assigns_default_role() {
        let (service, _) = service(true).await;
        let session = service
            .register(request("alice@example.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(session.role_name.unwrap().as_str(), "USER");
        assert!(!session.token.token.is_empty());
        assert_ne!(session.user.password_hash, "secret1");
    }

    #[tokio::test]
    async fn test_register_without_default_role_is_internal_error() {
        let (service, _) = service(false).await;
        let err = service
            .register(request("alice@example.com", "secret1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.message, "Error: USER role does not exist in the database");
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates_and_bad_input() {
        let (service, _) = service(true).await;
        service
            .register(request("alice@example.com", "secret1"))
            .await
            .unwrap();

        let dup = service
            .register(request("ALICE@example.com", "secret1"))
            .await
            .unwrap_err();
        assert_eq!(dup.kind, ErrorKind::Conflict);

        let short = service
            .register(request("bob@example.com", "12345"))
            .await
            .unwrap_err();
        assert_eq!(short.kind, ErrorKind::Validation);

        let bad_email = service
            .register(request("bob-at-example", "secret1"))
            .await
            .unwrap_err();
        assert_eq!(bad_email.message, "Invalid email format");
    }

    #[tokio::test]
    async fn test_login_outcomes() {
        let (service, _) = service(true).await;
        service
            .register(request("alice@example.com", "secret1"))
            .await
            .unwrap();

        assert!(service.login("alice@example.com", "secret1").await.is_ok());

        let wrong = service
            .login("alice@example.com", "nope!!")
            .await
            .unwrap_err();
        assert_eq!(wrong.kind, ErrorKind::Unauthorized);
        assert_eq!(wrong.message, "Invalid credentials");

        let unknown = service
            .login("ghost@example.com", "secret1")
            .await
            .unwrap_err();
        assert_eq!(unknown.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_change_password() {
        let (service, _) = service(true).await;
        let user = service
            .register(request("alice@example.com", "secret1"))
            .await
            .unwrap()
            .user;

        let wrong = service
            .change_password(user.id, "bad-current", "secret2")
            .await
            .unwrap_err();
        assert_eq!(wrong.message, "Current password is incorrect");

        let short = service
            .change_password(user.id, "secret1", "abc")
            .await
            .unwrap_err();
        assert_eq!(short.message, "New password must be at least 6 characters long");

        service
            .change_password(user.id, "secret1", "secret2")
            .await
            .unwrap();
        assert!(service.login("alice@example.com", "secret2").await.is_ok());
        assert!(service.login("alice@example.com", "secret1").await.is_err());
    }
}
