//! # storefront-entity
//!
//! Domain entity models for Storefront. Every struct in this crate
//! represents a stored record or a domain value object. Stored entities
//! derive `sqlx::FromRow` so the PostgreSQL repositories can map rows
//! directly.

pub mod permission;
pub mod product;
pub mod role;
pub mod user;
