//! Role name value object.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::AppError;

/// A role name, trimmed and normalized to upper case (`editor` → `EDITOR`).
///
/// Uniqueness is enforced by the store at write time; normalization here
/// guarantees `Editor` and `EDITOR` collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "String", into = "String")]
#[sqlx(transparent)]
pub struct RoleName(String);

impl RoleName {
    /// Parse and normalize a raw role name.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("Role name cannot be empty"));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Return the normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RoleName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RoleName {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RoleName> for String {
    fn from(name: RoleName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_to_upper_case() {
        assert_eq!(RoleName::parse(" editor ").unwrap().as_str(), "EDITOR");
        assert_eq!(
            RoleName::parse("Editor").unwrap(),
            RoleName::parse("EDITOR").unwrap()
        );
    }

    #[test]
    fn test_rejects_blank() {
        assert!(RoleName::parse("   ").is_err());
        assert!(serde_json::from_str::<RoleName>("\"\"").is_err());
    }

    #[test]
    fn test_deserialize_normalizes() {
        let name: RoleName = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(name.to_string(), "USER");
    }
}
