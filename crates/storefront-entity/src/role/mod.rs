//! Role domain entities.

pub mod model;
pub mod name;

pub use model::{CreateRole, PopulatedRole, Role, UpdateRole};
pub use name::RoleName;
