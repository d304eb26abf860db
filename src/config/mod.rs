use crate::core::Result;
use serde::Deserialize;
use std::env;

pub mod database;
pub mod statutory;

pub use database::DatabaseConfig;
pub use statutory::StatutoryConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub statutory: StatutoryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Statutory tables come from `STATUTORY_CONFIG_PATH` (YAML or JSON)
    /// when set, otherwise the built-in defaults.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let statutory = match env::var("STATUTORY_CONFIG_PATH") {
            Ok(path) => StatutoryConfig::from_file(path)?,
            Err(_) => StatutoryConfig::default(),
        };

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            statutory,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.statutory.validate()
    }
}
