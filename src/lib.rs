//! User Registry API
//!
//! User management over HTTP with:
//! - Validated create, fetch and full-replacement update of users
//! - Paged listings with dynamic multi-field ordering (`_page`, `_size`, `_order`)
//! - In-memory or PostgreSQL storage, with paging pushed down to SQL

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::{AppState, UserServiceTrait};
use config::StorageBackend;
use infrastructure::storage::run_migrations;
use infrastructure::user::{
    Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, UserService,
};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// Create the application state with default configuration (in-memory storage)
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let hasher = Arc::new(Argon2Hasher::new());

    info!(backend = ?config.storage.backend, "Initializing user storage");

    let user_service: Arc<dyn UserServiceTrait> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            hasher,
        )),
        StorageBackend::Postgres => {
            let database_url = config.storage.resolved_database_url().ok_or_else(|| {
                anyhow::anyhow!(
                    "storage.database_url or DATABASE_URL is required for the postgres backend"
                )
            })?;

            info!("Connecting to PostgreSQL...");
            let pool = PgPoolOptions::new()
                .max_connections(config.storage.max_connections())
                .connect(&database_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
            info!("PostgreSQL connection established");

            run_migrations(&pool).await?;

            Arc::new(UserService::new(
                Arc::new(PostgresUserRepository::new(pool)),
                hasher,
            ))
        }
    };

    Ok(AppState::new(user_service, config.pagination))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_state_uses_memory_storage() {
        let state = create_app_state().await.unwrap();

        assert_eq!(state.user_service.count().await.unwrap(), 0);
        assert_eq!(state.pagination.default_page_size, 10);
    }

    #[tokio::test]
    async fn test_postgres_backend_requires_url() {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Postgres;
        config.storage.database_url = Some("   ".to_string());

        if std::env::var("DATABASE_URL").is_err() {
            assert!(create_app_state_with_config(&config).await.is_err());
        }
    }
}
