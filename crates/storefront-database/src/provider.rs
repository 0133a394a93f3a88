//! Store provider selection.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use storefront_core::config::DatabaseConfig;
use storefront_core::error::{AppError, ErrorKind};
use storefront_core::result::AppResult;

use crate::memory::MemoryStore;
use crate::repositories::{
    PermissionRepository, ProductRepository, RoleRepository, UserRepository,
};
use crate::store::{PermissionStore, ProductStore, RoleStore, UserStore};

/// Schema for the `users`, `roles`, `permissions`, `role_permissions` and
/// `products` tables.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// The set of stores handed to the service layer.
///
/// The provider is selected at construction time based on configuration.
#[derive(Clone)]
pub struct Repositories {
    /// User store.
    pub users: Arc<dyn UserStore>,
    /// Role store.
    pub roles: Arc<dyn RoleStore>,
    /// Permission store.
    pub permissions: Arc<dyn PermissionStore>,
    /// Product store.
    pub products: Arc<dyn ProductStore>,
    /// Connection pool, when backed by PostgreSQL.
    pool: Option<PgPool>,
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories")
            .field("provider", &self.provider_name())
            .finish()
    }
}

impl Repositories {
    /// Build the stores from configuration.
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "memory" => {
                info!("Initializing in-memory store provider");
                Ok(Self::in_memory())
            }
            "postgres" => {
                let pool = open_pool(config).await?;
                if config.run_migrations {
                    MIGRATOR.run(&pool).await.map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Schema migration failed", e)
                    })?;
                    info!(applied = MIGRATOR.iter().count(), "Schema up to date");
                }
                Ok(Self::postgres(pool))
            }
            other => Err(AppError::configuration(format!(
                "Unknown store provider: '{other}'. Supported: memory, postgres"
            ))),
        }
    }

    /// Stores sharing a single fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            roles: store.clone(),
            permissions: store.clone(),
            products: store,
            pool: None,
        }
    }

    /// Stores backed by PostgreSQL repositories.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            roles: Arc::new(RoleRepository::new(pool.clone())),
            permissions: Arc::new(PermissionRepository::new(pool.clone())),
            products: Arc::new(ProductRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Name of the active provider.
    pub fn provider_name(&self) -> &'static str {
        if self.pool.is_some() { "postgres" } else { "memory" }
    }

    /// Check that the backing store is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        let Some(pool) = &self.pool else {
            return Ok(true);
        };
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(pool)
            .await
            .map(|one| one == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Store unreachable", e))
    }

    /// Release pooled connections.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("PostgreSQL pool closed");
        }
    }
}

/// Open the PostgreSQL pool described by `config`.
async fn open_pool(config: &DatabaseConfig) -> AppResult<PgPool> {
    info!(
        max_connections = config.max_connections,
        "Initializing PostgreSQL store provider"
    );
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .connect(&config.url)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Cannot reach PostgreSQL", e))
}
