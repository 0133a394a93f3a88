//! Product repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use storefront_core::result::AppResult;
use storefront_entity::product::{CreateProduct, Product, UpdateProduct};

use super::map_read_error;
use crate::store::ProductStore;

/// PostgreSQL-backed product store.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn list_active(&self) -> AppResult<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE is_active ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_read_error("Failed to list products"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_error("Failed to find product"))
    }

    async fn create(&self, data: &CreateProduct) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products (id, name, description, price, stock, image) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.stock)
        .bind(&data.image)
        .fetch_one(&self.pool)
        .await
        .map_err(map_read_error("Failed to create product"))
    }

    async fn update(&self, id: Uuid, data: &UpdateProduct) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET \
               name = COALESCE($2, name), \
               description = COALESCE($3, description), \
               price = COALESCE($4, price), \
               stock = COALESCE($5, stock), \
               image = COALESCE($6, image), \
               is_active = COALESCE($7, is_active), \
               updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.stock)
        .bind(&data.image)
        .bind(data.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_read_error("Failed to update product"))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_read_error("Failed to delete product"))?;
        Ok(result.rows_affected() > 0)
    }
}
