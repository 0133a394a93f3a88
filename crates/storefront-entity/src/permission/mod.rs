//! Permission domain entities.

pub mod model;
pub mod name;

pub use model::{CreatePermission, Permission, UpdatePermission};
pub use name::PermissionName;
