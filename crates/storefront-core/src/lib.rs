//! # storefront-core
//!
//! Core crate for Storefront. Contains configuration schemas, the unified
//! error system, and the JSON envelope every endpoint answers with.
//!
//! This crate has **no** internal dependencies on other Storefront crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
