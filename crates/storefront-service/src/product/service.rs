//! Product catalog operations.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_database::ProductStore;
use storefront_entity::product::{CreateProduct, Product, UpdateProduct};

use crate::validation;

/// Handles the product catalog.
#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductStore>,
}

impl std::fmt::Debug for ProductService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductService").finish_non_exhaustive()
    }
}

impl ProductService {
    /// Creates a new product service.
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    /// Lists active products.
    pub async fn list(&self) -> AppResult<Vec<Product>> {
        self.products.list_active().await
    }

    /// Gets a product, active or not.
    pub async fn get(&self, id: Uuid) -> AppResult<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))
    }

    /// Creates a product.
    pub async fn create(&self, data: CreateProduct) -> AppResult<Product> {
        validation::not_blank(&data.name, "Name")?;
        validation::not_blank(&data.description, "Description")?;
        check_price(data.price)?;
        check_stock(data.stock)?;

        let product = self.products.create(&data).await?;
        info!(product_id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Updates product fields.
    pub async fn update(&self, id: Uuid, data: UpdateProduct) -> AppResult<Product> {
        if let Some(name) = &data.name {
            validation::not_blank(name, "Name")?;
        }
        if let Some(price) = data.price {
            check_price(price)?;
        }
        if let Some(stock) = data.stock {
            check_stock(stock)?;
        }

        let product = self
            .products
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))?;
        info!(product_id = %id, "Product updated");
        Ok(product)
    }

    /// Deletes a product.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.products.delete(id).await? {
            return Err(AppError::not_found("Product not found"));
        }
        info!(product_id = %id, "Product deleted");
        Ok(())
    }
}

fn check_price(price: f64) -> AppResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::validation("Price cannot be negative"));
    }
    Ok(())
}

fn check_stock(stock: i32) -> AppResult<()> {
    if stock < 0 {
        return Err(AppError::validation("Stock cannot be negative"));
    }
    Ok(())
}
