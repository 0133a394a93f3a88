//! Resolves a bearer credential to a [`Principal`].

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use storefront_core::result::AppResult;
use storefront_database::UserStore;

use super::error::CredentialError;
use super::principal::Principal;
use crate::jwt::JwtDecoder;

const BEARER_PREFIX: &str = "Bearer ";

/// Verifies bearer credentials and loads the referenced user.
#[derive(Clone)]
pub struct CredentialVerifier {
    decoder: JwtDecoder,
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVerifier")
            .field("decoder", &self.decoder)
            .finish()
    }
}

impl CredentialVerifier {
    /// Create a verifier over the given decoder and user store.
    pub fn new(decoder: JwtDecoder, users: Arc<dyn UserStore>) -> Self {
        Self { decoder, users }
    }

    /// Extract the token from an `Authorization` header value.
    pub fn bearer_token(header: Option<&str>) -> Result<&str, CredentialError> {
        let token = header
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .unwrap_or_default();
        if token.is_empty() {
            return Err(CredentialError::MissingCredential);
        }
        Ok(token)
    }

    /// Verify a token and return its subject. No store access.
    pub fn verify(&self, token: &str) -> Result<Uuid, CredentialError> {
        self.decoder.decode(token).map(|claims| claims.user_id())
    }

    /// Resolve an `Authorization` header value to the user it names.
    ///
    /// Credential problems surface as a 401 [`CredentialError`]; a failing
    /// user lookup is passed through unchanged.
    pub async fn resolve_identity(&self, header: Option<&str>) -> AppResult<Principal> {
        let token = Self::bearer_token(header)?;
        let user_id = self.verify(token)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(CredentialError::UnknownSubject)?;

        debug!(user_id = %user.id, "Credential resolved");
        Ok(Principal::from(user))
    }
}

#[cfg(test)]
mod tests {
    use storefront_core::config::AuthConfig;
    use storefront_core::error::ErrorKind;
    use storefront_database::MemoryStore;
    use storefront_entity::user::CreateUser;

    use super::*;
    use crate::jwt::JwtEncoder;

    fn setup() -> (CredentialVerifier, JwtEncoder, Arc<MemoryStore>) {
        let config = AuthConfig::default();
        let store = Arc::new(MemoryStore::new());
        let verifier = CredentialVerifier::new(JwtDecoder::new(&config), store.clone());
        (verifier, JwtEncoder::new(&config), store)
    }

    async fn create_user(store: &MemoryStore) -> storefront_entity::user::User {
        UserStore::create(
            store,
            &CreateUser {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: "hash".to_string(),
                role_id: Uuid::new_v4(),
            },
        )
        .await
        .unwrap()
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(CredentialVerifier::bearer_token(Some("Bearer abc")), Ok("abc"));
        assert_eq!(
            CredentialVerifier::bearer_token(None),
            Err(CredentialError::MissingCredential)
        );
        assert_eq!(
            CredentialVerifier::bearer_token(Some("Basic abc")),
            Err(CredentialError::MissingCredential)
        );
        assert_eq!(
            CredentialVerifier::bearer_token(Some("Bearer   ")),
            Err(CredentialError::MissingCredential)
        );
    }

    #[tokio::test]
    async fn test_resolves_existing_user() {
        let (verifier, encoder, store) = setup();
        let user = create_user(&store).await;
        let token = encoder.issue(user.id).unwrap().token;

        let principal = verifier
            .resolve_identity(Some(&format!("Bearer {token}")))
            .await
            .unwrap();
        assert_eq!(principal.id, user.id);
        assert_eq!(principal.role_id, user.role_id);
    }

    #[tokio::test]
    async fn test_deleted_subject_is_unauthenticated() {
        let (verifier, encoder, store) = setup();
        let user = create_user(&store).await;
        let token = encoder.issue(user.id).unwrap().token;
        UserStore::delete(store.as_ref(), user.id).await.unwrap();

        let err = verifier
            .resolve_identity(Some(&format!("Bearer {token}")))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.message, CredentialError::UnknownSubject.to_string());
    }

    #[tokio::test]
    async fn test_missing_and_malformed_are_unauthenticated() {
        let (verifier, _, _) = setup();
        for header in [None, Some("Bearer junk"), Some("junk")] {
            let err = verifier.resolve_identity(header).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Unauthorized);
        }
    }
}
