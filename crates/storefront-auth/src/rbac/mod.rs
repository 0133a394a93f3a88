//! Role-based access control: resolving a principal's permissions and
//! deciding gate outcomes.

pub mod context;
pub mod enforcer;
pub mod permission_set;
pub mod resolver;

pub use context::AuthorizationContext;
pub use enforcer::RbacEnforcer;
pub use permission_set::PermissionSet;
pub use resolver::AuthorizationResolver;
