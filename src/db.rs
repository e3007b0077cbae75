use crate::errors::OpsError;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::{debug, info};

/// Type alias for the database handle
pub type DbPool = DatabaseConnection;

/// Connection tuning for the provisioning workload.
///
/// Both operations here are single-writer and strictly sequential, so the
/// pool is pinned to exactly one connection, held for the duration of the
/// operation and released afterwards.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Database connection URL
    pub url: String,
    /// Connection timeout duration
    pub connect_timeout: Duration,
    /// Acquire connection timeout
    pub acquire_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            connect_timeout: Duration::from_secs(10),
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

/// Establishes the single database connection used by an operation.
///
/// # Errors
/// Returns [`OpsError::Connectivity`] if the connection cannot be
/// established.
pub async fn connect(database_url: &str) -> Result<DbPool, OpsError> {
    let config = DbConfig {
        url: database_url.to_string(),
        ..Default::default()
    };
    connect_with_config(&config).await
}

pub async fn connect_with_config(config: &DbConfig) -> Result<DbPool, OpsError> {
    debug!("configuring database connection: {:?}", config);

    let mut opt = ConnectOptions::new(config.url.clone());
    opt.max_connections(1)
        .min_connections(1)
        .connect_timeout(config.connect_timeout)
        .acquire_timeout(config.acquire_timeout)
        .sqlx_logging(false);

    let db = Database::connect(opt).await.map_err(OpsError::from)?;
    info!("database connection established");
    Ok(db)
}

/// Releases the connection. Failures during close are swallowed after
/// logging: release runs on every exit path, including after an operation
/// has already failed.
pub async fn release(db: DbPool) {
    if let Err(e) = db.close().await {
        debug!("error while closing database connection: {}", e);
    }
    info!("Database connection closed.");
}
