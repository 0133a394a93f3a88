//! # storefront-service
//!
//! Business logic service layer for Storefront. Each service orchestrates
//! the stores and the auth primitives to implement one slice of the API.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references. Authorization is not checked
//! here; the HTTP gates run before any service method is reached.

pub mod auth;
pub mod bootstrap;
pub mod permission;
pub mod product;
pub mod role;
pub mod user;

mod validation;

pub use auth::AuthService;
pub use bootstrap::{Bootstrap, SeedReport};
pub use permission::PermissionService;
pub use product::ProductService;
pub use role::RoleService;
pub use user::{UserService, UserWithRole};
