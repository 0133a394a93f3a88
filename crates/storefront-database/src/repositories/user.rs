//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use storefront_core::result::AppResult;
use storefront_entity::user::{CreateUser, UpdateUser, User};

use super::{map_read_error, map_write_error};
use crate::store::UserStore;

const EMAIL_CONSTRAINT: &str = "users_email_key";

/// PostgreSQL-backed user store.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_error("Failed to find user by id"))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_error("Failed to find user by email"))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(map_read_error("Failed to list users"))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, email, password_hash, role_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(&data.username)
        .bind(data.email.trim())
        .bind(&data.password_hash)
        .bind(data.role_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                EMAIL_CONSTRAINT,
                || format!("Email '{}' is already registered", data.email),
                "Failed to create user",
            )
        })
    }

    async fn update_profile(&self, id: Uuid, data: &UpdateUser) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET \
               username = COALESCE($2, username), \
               email = COALESCE($3, email), \
               updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(&data.username)
        .bind(data.email.as_deref().map(str::trim))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                EMAIL_CONSTRAINT,
                || {
                    format!(
                        "Email '{}' is already registered",
                        data.email.as_deref().unwrap_or_default()
                    )
                },
                "Failed to update user",
            )
        })
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(map_read_error("Failed to update password"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_role(&self, id: Uuid, role_id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET role_id = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_read_error("Failed to update user role"))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_read_error("Failed to delete user"))?;
        Ok(result.rows_affected() > 0)
    }
}
