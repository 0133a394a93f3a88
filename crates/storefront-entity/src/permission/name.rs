//! Permission name value object.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::AppError;

/// The name of an atomic capability, conventionally `resource:action`
/// (e.g. `users:update`).
///
/// Names are trimmed but otherwise kept verbatim: matching is exact and
/// case-sensitive, so `Users:Update` and `users:update` are different
/// permissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "String", into = "String")]
#[sqlx(transparent)]
pub struct PermissionName(String);

impl PermissionName {
    /// Parse a raw permission name.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("Permission name cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Return the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PermissionName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PermissionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PermissionName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PermissionName {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PermissionName> for String {
    fn from(name: PermissionName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_is_preserved() {
        let name = PermissionName::parse("Products:Update").unwrap();
        assert_eq!(name.as_str(), "Products:Update");
        assert_ne!(name, PermissionName::parse("products:update").unwrap());
    }

    #[test]
    fn test_rejects_blank() {
        assert!(PermissionName::parse("").is_err());
        assert!(PermissionName::parse("  ").is_err());
    }
}
