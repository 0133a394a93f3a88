//! The authenticated identity attached to a request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_entity::user::User;

/// A user resolved from a bearer credential, without the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// The single role the user references.
    pub role_id: Uuid,
}

impl Principal {
    /// Whether `target` names this principal.
    ///
    /// `target` is the raw path segment; anything that is not a UUID never
    /// matches.
    pub fn is_target(&self, target: &str) -> bool {
        Uuid::parse_str(target.trim()).is_ok_and(|id| id == self.id)
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role_id: user.role_id,
        }
    }
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal() -> Principal {
        Principal {
            id: Uuid::new_v4(),
            username: "u2".to_string(),
            email: "u2@example.com".to_string(),
            role_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_is_target_matches_own_id_only() {
        let p = principal();
        assert!(p.is_target(&p.id.to_string()));
        assert!(p.is_target(&p.id.to_string().to_uppercase()));
        assert!(!p.is_target(&Uuid::new_v4().to_string()));
        assert!(!p.is_target("me"));
        assert!(!p.is_target(""));
    }
}
