//! Role/permission bootstrap configuration.

use serde::{Deserialize, Serialize};

/// Controls the built-in roles and the optional administrator account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Create the built-in permissions and roles on startup when missing.
    #[serde(default = "default_true")]
    pub seed_defaults: bool,
    /// Role assigned to self-registered users.
    #[serde(default = "default_role")]
    pub default_role: String,
    /// Role holding every built-in permission.
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
    /// Email of the administrator account created at startup (optional).
    #[serde(default)]
    pub admin_email: Option<String>,
    /// Username of the administrator account.
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    /// Password of the administrator account (optional).
    #[serde(default)]
    pub admin_password: Option<String>,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            seed_defaults: default_true(),
            default_role: default_role(),
            admin_role: default_admin_role(),
            admin_email: None,
            admin_username: default_admin_username(),
            admin_password: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_role() -> String {
    "USER".to_string()
}

fn default_admin_role() -> String {
    "ADMIN".to_string()
}

fn default_admin_username() -> String {
    "admin".to_string()
}
