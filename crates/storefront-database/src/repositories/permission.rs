//! Permission repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use storefront_core::result::AppResult;
use storefront_entity::permission::{CreatePermission, Permission, PermissionName, UpdatePermission};

use super::{map_read_error, map_write_error};
use crate::store::PermissionStore;

const NAME_CONSTRAINT: &str = "permissions_name_key";

/// PostgreSQL-backed permission store.
#[derive(Debug, Clone)]
pub struct PermissionRepository {
    pool: PgPool,
}

impl PermissionRepository {
    /// Create a new permission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionStore for PermissionRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, Permission>("SELECT * FROM permissions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_error("Failed to find permission by id"))
    }

    async fn find_by_name(&self, name: &PermissionName) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, Permission>("SELECT * FROM permissions WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_error("Failed to find permission by name"))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Permission>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Permission>(
            "SELECT * FROM permissions WHERE id = ANY($1) ORDER BY created_at ASC",
        )
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(map_read_error("Failed to find permissions by ids"))
    }

    async fn list(&self) -> AppResult<Vec<Permission>> {
        sqlx::query_as::<_, Permission>("SELECT * FROM permissions ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(map_read_error("Failed to list permissions"))
    }

    async fn create(&self, data: &CreatePermission) -> AppResult<Permission> {
        sqlx::query_as::<_, Permission>(
            "INSERT INTO permissions (id, name, description) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                NAME_CONSTRAINT,
                || format!("Permission '{}' already exists", data.name),
                "Failed to create permission",
            )
        })
    }

    async fn update(&self, id: Uuid, data: &UpdatePermission) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, Permission>(
            "UPDATE permissions SET \
               name = COALESCE($2, name), \
               description = COALESCE($3, description), \
               updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                NAME_CONSTRAINT,
                || "A permission with that name already exists".to_string(),
                "Failed to update permission",
            )
        })
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        // role_permissions rows go with it (ON DELETE CASCADE).
        let result = sqlx::query("DELETE FROM permissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_read_error("Failed to delete permission"))?;
        Ok(result.rows_affected() > 0)
    }
}
