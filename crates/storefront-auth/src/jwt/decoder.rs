//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use storefront_core::config::AuthConfig;

use super::claims::Claims;
use crate::credential::CredentialError;

/// Validates HS256 bearer tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.jwt_leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes a token, checking signature and expiry.
    pub fn decode(&self, token: &str) -> Result<Claims, CredentialError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => "token has expired",
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => "invalid token signature",
                    _ => "malformed token",
                };
                CredentialError::InvalidCredential(reason)
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::jwt::JwtEncoder;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            jwt_leeway_seconds: 0,
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_issued_token_decodes_to_subject() {
        let cfg = config("test-secret");
        let user_id = Uuid::new_v4();
        let issued = JwtEncoder::new(&cfg).issue(user_id).unwrap();

        let claims = JwtDecoder::new(&cfg).decode(&issued.token).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn test_rejects_foreign_signature() {
        let issued = JwtEncoder::new(&config("one")).issue(Uuid::new_v4()).unwrap();
        let err = JwtDecoder::new(&config("two")).decode(&issued.token).unwrap_err();
        assert_eq!(
            err,
            CredentialError::InvalidCredential("invalid token signature")
        );
    }

    #[test]
    fn test_rejects_expired_token() {
        let cfg = config("test-secret");
        let now = Utc::now().timestamp();
        let token = JwtEncoder::new(&cfg)
            .encode_claims(&Claims {
                sub: Uuid::new_v4(),
                iat: now - 7200,
                exp: now - 3600,
            })
            .unwrap();

        let err = JwtDecoder::new(&cfg).decode(&token).unwrap_err();
        assert_eq!(err, CredentialError::InvalidCredential("token has expired"));
    }

    #[test]
    fn test_rejects_garbage() {
        let decoder = JwtDecoder::new(&config("test-secret"));
        assert!(decoder.decode("not-a-token").is_err());
        assert!(decoder.decode("").is_err());
    }
}
