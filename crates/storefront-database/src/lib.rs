//! # storefront-database
//!
//! Persistence for Storefront. The store traits in [`store`] are the only
//! surface the rest of the workspace sees; two providers implement them:
//!
//! - `memory` — `DashMap`-backed, for development and tests
//! - `postgres` — `sqlx` repositories with embedded migrations
//!
//! [`Repositories`] picks the provider from configuration.

pub mod memory;
pub mod provider;
pub mod repositories;
pub mod store;

pub use memory::MemoryStore;
pub use provider::Repositories;
pub use store::{PermissionStore, ProductStore, RoleStore, UserStore};
