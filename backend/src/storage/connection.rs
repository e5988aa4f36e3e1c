use anyhow::{Context, Result};
use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::migrate::MigrateDatabase;
use sqlx::{Any, AnyPool};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::DatabaseConfig;

/// DbConnection owns the connection pool shared by all repositories
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<AnyPool>,
}

impl DbConnection {
    /// Connect to `url` and make sure the schema exists.
    ///
    /// The URL scheme selects the driver (`postgres://` or `sqlite:`).
    pub async fn new(url: &str, max_connections: u32) -> Result<Self> {
        install_default_drivers();

        // Create database if it doesn't exist
        let exists = match Any::database_exists(url).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!("Could not check whether the database exists: {}", e);
                false
            }
        };
        if !exists {
            info!("Creating database");
            Any::create_database(url)
                .await
                .context("Failed to create database")?;
        }

        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .context("Failed to connect to database")?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize the database described by the application config
    pub async fn init(config: &DatabaseConfig) -> Result<Self> {
        Self::new(&config.connection_url(), config.max_connections).await
    }

    /// Private in-memory SQLite database, used by tests.
    ///
    /// Every SQLite connection to `:memory:` gets its own empty database, so
    /// the pool is limited to a single connection.
    pub async fn in_memory() -> Result<Self> {
        Self::new("sqlite::memory:", 1).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &AnyPool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS todos (
                id VARCHAR(36) PRIMARY KEY,
                name VARCHAR(36) NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT,
                start_date_at TEXT,
                due_date_at TEXT,
                status VARCHAR(16) NOT NULL DEFAULT 'IDLE'
                    CHECK (status IN ('IN PROCESS', 'DONE', 'IDLE'))
            );
            "#,
        )
        .execute(pool)
        .await
        .context("Failed to create todos table")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_todos_status ON todos(status);")
            .execute(pool)
            .await
            .context("Failed to create status index")?;

        Ok(())
    }
}
