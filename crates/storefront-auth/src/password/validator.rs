//! Password policy for new passwords.

use storefront_core::config::AuthConfig;
use storefront_core::error::AppError;

/// Enforces the configured minimum password length.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length, in characters.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Minimum accepted length.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Validates a password chosen at registration.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        self.check(password, "Password")
    }

    /// Validates the replacement password in a password change.
    pub fn validate_new(&self, password: &str) -> Result<(), AppError> {
        self.check(password, "New password")
    }

    fn check(&self, password: &str, label: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "{label} must be at least {} characters long",
                self.min_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_length() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        assert!(validator.validate("12345").is_err());
        assert!(validator.validate("123456").is_ok());

        let err = validator.validate_new("abc").unwrap_err();
        assert_eq!(err.message, "New password must be at least 6 characters long");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        assert!(validator.validate("ñññññ").is_err());
        assert!(validator.validate("ññññññ").is_ok());
    }
}
