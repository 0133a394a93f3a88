//! Catalog product entities.

pub mod model;

pub use model::{CreateProduct, Product, UpdateProduct};
