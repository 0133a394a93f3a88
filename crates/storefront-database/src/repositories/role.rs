//! Role repository implementation.
//!
//! Permission references live in `role_permissions`; every read aggregates
//! them back into `Role::permission_ids` in insertion order.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use storefront_core::result::AppResult;
use storefront_entity::role::{CreateRole, Role, RoleName, UpdateRole};

use super::{map_read_error, map_write_error};
use crate::store::RoleStore;

const NAME_CONSTRAINT: &str = "roles_name_key";

const SELECT_ROLE: &str = "SELECT r.id, r.name, r.description, r.created_at, r.updated_at, \
       COALESCE( \
         ARRAY_AGG(rp.permission_id ORDER BY rp.created_at) \
           FILTER (WHERE rp.permission_id IS NOT NULL), \
         '{}'::uuid[] \
       ) AS permission_ids \
     FROM roles r \
     LEFT JOIN role_permissions rp ON rp.role_id = r.id";

/// PostgreSQL-backed role store.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for RoleRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>(&format!("{SELECT_ROLE} WHERE r.id = $1 GROUP BY r.id"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_error("Failed to find role by id"))
    }

    async fn find_by_name(&self, name: &RoleName) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>(&format!("{SELECT_ROLE} WHERE r.name = $1 GROUP BY r.id"))
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_error("Failed to find role by name"))
    }

    async fn list(&self) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>(&format!(
            "{SELECT_ROLE} GROUP BY r.id ORDER BY r.created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_read_error("Failed to list roles"))
    }

    async fn create(&self, data: &CreateRole) -> AppResult<Role> {
        sqlx::query_as::<_, Role>(
            "INSERT INTO roles (id, name, description) VALUES ($1, $2, $3) \
             RETURNING id, name, description, created_at, updated_at, \
                       '{}'::uuid[] AS permission_ids",
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
                || format!("Role '{}' already exists", data.name),
                "Failed to create role",
            )
        })
    }

    async fn update(&self, id: Uuid, data: &UpdateRole) -> AppResult<Option<Role>> {
        let updated = sqlx::query(
            "UPDATE roles SET \
               name = COALESCE($2, name), \
               description = COALESCE($3, description), \
               updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                NAME_CONSTRAINT,
                || {
                    data.name
                        .as_ref()
                        .map(|name| format!("Role '{name}' already exists"))
                        .unwrap_or_else(|| "Role name already exists".to_string())
                },
                "Failed to update role",
            )
        })?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_read_error("Failed to delete role"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_permissions(&self, id: Uuid, permission_ids: &[Uuid]) -> AppResult<Option<Role>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(map_read_error("Failed to begin transaction"))?;

        let touched = sqlx::query("UPDATE roles SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_read_error("Failed to update role"))?;
        if touched.rows_affected() == 0 {
            return Ok(None);
        }

        sqlx::query(
            "INSERT INTO role_permissions (role_id, permission_id) \
             SELECT $1, pid FROM UNNEST($2::uuid[]) WITH ORDINALITY AS t(pid, ord) \
             ORDER BY ord \
             ON CONFLICT DO NOTHING",
        )
        .bind(id)
        .bind(permission_ids.to_vec())
        .execute(&mut *tx)
        .await
        .map_err(map_read_error("Failed to add role permissions"))?;

        tx.commit()
            .await
            .map_err(map_read_error("Failed to commit transaction"))?;

        self.find_by_id(id).await
    }

    async fn remove_permissions(
        &self,
        id: Uuid,
        permission_ids: &[Uuid],
    ) -> AppResult<Option<Role>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(map_read_error("Failed to begin transaction"))?;

        let touched = sqlx::query("UPDATE roles SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_read_error("Failed to update role"))?;
        if touched.rows_affected() == 0 {
            return Ok(None);
        }

        sqlx::query("DELETE FROM role_permissions WHERE role_id = $1 AND permission_id = ANY($2)")
            .bind(id)
            .bind(permission_ids.to_vec())
            .execute(&mut *tx)
            .await
            .map_err(map_read_error("Failed to remove role permissions"))?;

        tx.commit()
            .await
            .map_err(map_read_error("Failed to commit transaction"))?;

        self.find_by_id(id).await
    }
}
