//! Product entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Image used when a product is created without one.
pub const DEFAULT_PRODUCT_IMAGE: &str = "default-product.jpg";

/// A catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: Uuid,
    /// Product name.
    pub name: String,
    /// Product description.
    pub description: String,
    /// Unit price, never negative.
    pub price: f64,
    /// Units in stock, never negative.
    pub stock: i32,
    /// Image file name or URL.
    pub image: String,
    /// Inactive products are hidden from the listing.
    pub is_active: bool,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProduct {
    /// Product name.
    pub name: String,
    /// Product description.
    pub description: String,
    /// Unit price.
    pub price: f64,
    /// Initial stock.
    pub stock: i32,
    /// Image file name or URL.
    pub image: String,
}

/// Product fields that may be changed; `None` leaves the field as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProduct {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New price.
    pub price: Option<f64>,
    /// New stock.
    pub stock: Option<i32>,
    /// New image.
    pub image: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}
