pub mod entities;
pub mod migrator;
pub mod repositories;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::shared::retry::{retry_with_backoff, RetryConfig};

/// Default database location, created next to the process on first run
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./mottu.db?mode=rwc";

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./mottu.db?mode=rwc" or "sqlite::memory:")
    pub url: String,
    /// Upper bound of the connection pool
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            ..Self::default()
        }
    }

    /// Private in-memory SQLite database, used by tests
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    /// Every pooled connection to an in-memory SQLite URL opens its own
    /// empty database, so those pools are pinned to a single connection.
    pub fn is_in_memory(&self) -> bool {
        self.url.starts_with("sqlite::memory:") || self.url.contains("mode=memory")
    }

    fn connect_options(&self) -> ConnectOptions {
        let mut opts = ConnectOptions::new(self.url.clone());
        if self.is_in_memory() {
            opts.max_connections(1).min_connections(1);
        } else {
            opts.max_connections(self.max_connections.max(1));
        }
        opts.connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);
        opts
    }
}

/// Initialize database connection, retrying transient connection failures
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    info!("Connecting to database: {}", config.url);
    let db = retry_with_backoff(
        &RetryConfig::default(),
        || Database::connect(config.connect_options()),
        |e| matches!(e, DbErr::Conn(_)),
        "database connect",
    )
    .await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Fresh in-memory database with every migration applied
#[cfg(test)]
pub(crate) async fn test_db() -> DatabaseConnection {
    use sea_orm_migration::MigratorTrait;

    let db = init_database(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory sqlite");
    migrator::Migrator::up(&db, None).await.expect("migrations");
    db
}
