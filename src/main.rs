//! Storefront Server — e-commerce backend with role-based access control
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use storefront_api::{AppState, build_app, shutdown_signal};
use storefront_core::config::AppConfig;
use storefront_core::error::AppError;
use storefront_database::Repositories;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let dir = std::env::var("STOREFRONT_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("STOREFRONT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = AppConfig::load(&dir, &env)?;
    config.validate()?;
    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Storefront v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Backing store ────────────────────────────────────
    tracing::info!(
        "Initializing store (provider: {})...",
        config.database.provider
    );
    let repos = Repositories::from_config(&config.database).await?;

    // ── Step 2: Application state ────────────────────────────────
    let bind_address = config.server.bind_address();
    let seed_defaults = config.rbac.seed_defaults;
    let state = AppState::new(config, repos.clone());

    // ── Step 3: Built-in roles and permissions ───────────────────
    if seed_defaults {
        let report = state.bootstrap().run().await?;
        tracing::info!(
            permissions_created = report.permissions_created,
            roles_created = report.roles_created,
            admin_created = report.admin_created,
            "RBAC defaults ensured"
        );
    }

    // ── Step 4: Serve ────────────────────────────────────────────
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", bind_address, e)))?;
    tracing::info!("Listening on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 5: Cleanup ──────────────────────────────────────────
    repos.close().await;
    tracing::info!("Storefront stopped");
    Ok(())
}
