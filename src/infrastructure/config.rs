//! Application configuration

use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

/// Prefix of every environment variable read into [`AppConfig`]
pub const ENV_PREFIX: &str = "PFSHEET";

/// `database_url` value selecting the in-process store
pub const MEMORY_DATABASE: &str = "memory";

/// Application configuration loaded from environment
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server port
    pub server_port: u16,
    /// SQLite connection string, or `memory`
    pub database_url: String,
    /// How long an untouched sheet is kept
    pub session_ttl_secs: u64,
    /// Session key used when a request names none
    pub default_session: String,
    /// JSON snapshot new sessions start from instead of the blank sheet
    pub seed_character_path: Option<String>,
    /// Delay between purges of expired sheets
    pub cleanup_interval_secs: u64,
}

impl AppConfig {
    /// Load configuration from `PFSHEET_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::load(Environment::with_prefix(ENV_PREFIX))
    }

    fn load(environment: Environment) -> Result<Self> {
        let config = Config::builder()
            .set_default("server_port", 3000_i64)?
            .set_default("database_url", "sqlite://pfsheet.db")?
            .set_default("session_ttl_secs", 86_400_i64)?
            .set_default("default_session", "default")?
            .set_default("cleanup_interval_secs", 3_600_i64)?
            .add_source(environment.try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        let app_config: Self = config
            .try_deserialize()
            .context("Invalid configuration (check PFSHEET_* variables)")?;
        if app_config.cleanup_interval_secs == 0 {
            anyhow::bail!("PFSHEET_CLEANUP_INTERVAL_SECS must be greater than zero");
        }
        Ok(app_config)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE
    }
}
