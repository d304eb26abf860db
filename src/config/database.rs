use std::env;
use std::time::Duration;

use serde::Deserialize;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::core::{AppError, Result};

/// MySQL connection settings.
///
/// Period processing holds one connection per in-flight transaction and
/// returns it between employees, so a modest pool serves large batches.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    /// Seconds to wait for a free connection before failing the operation.
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(DatabaseConfig {
            url: env::var("DATABASE_URL")
                .map_err(|_| AppError::Configuration("DATABASE_URL not set".to_string()))?,
            min_connections: parse_env("DATABASE_MIN_CONNECTIONS", 5)?,
            max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 20)?,
            acquire_timeout_secs: parse_env("DATABASE_ACQUIRE_TIMEOUT_SECS", 30)?,
        })
    }

    /// Build the shared MySQL pool the repositories run on.
    pub async fn create_pool(&self) -> Result<MySqlPool> {
        MySqlPoolOptions::new()
            .min_connections(self.min_connections)
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .test_before_acquire(true)
            .connect(&self.url)
            .await
            .map_err(AppError::Database)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", name))),
        Err(_) => Ok(default),
    }
}

/// Apply embedded migrations (schema plus the uniqueness constraints the
/// payroll engine relies on).
pub async fn run_migrations(pool: &MySqlPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Migration failed: {}", e)))
}
