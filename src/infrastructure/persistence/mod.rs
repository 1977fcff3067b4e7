//! Character store adapters
//!
//! Sheets are stored as whole JSON snapshots keyed by session, either in
//! process memory or in SQLite. The backend is picked from configuration.

mod memory_store;
mod sqlite_store;

pub use memory_store::InMemoryCharacterStore;
pub use sqlite_store::SqliteCharacterStore;

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::application::ports::outbound::{CharacterStorePort, StoreError};
use crate::domain::value_objects::SessionKey;
use crate::infrastructure::config::AppConfig;

/// Moment a snapshot saved now with `ttl` stops being visible
fn expiry(ttl: Duration) -> Result<DateTime<Utc>, StoreError> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| StoreError::Database(format!("ttl of {:?} is out of range", ttl)))
}

/// Enum wrapper for store backends to enable runtime selection
#[derive(Debug, Clone)]
pub enum CharacterStoreBackend {
    Memory(InMemoryCharacterStore),
    Sqlite(SqliteCharacterStore),
}

impl CharacterStoreBackend {
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        if config.uses_memory_store() {
            return Ok(Self::Memory(InMemoryCharacterStore::new()));
        }

        let options = SqliteConnectOptions::from_str(&config.database_url)
            .with_context(|| format!("Invalid database URL: {}", config.database_url))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite")?;
        let store = SqliteCharacterStore::new(pool)
            .await
            .context("Failed to create character_sheets table")?;
        Ok(Self::Sqlite(store))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Sqlite(_) => "sqlite",
        }
    }
}

#[async_trait]
impl CharacterStorePort for CharacterStoreBackend {
    async fn load(&self, key: &SessionKey) -> Result<Option<Value>, StoreError> {
        match self {
            Self::Memory(store) => store.load(key).await,
            Self::Sqlite(store) => store.load(key).await,
        }
    }

    async fn save(&self, key: &SessionKey, document: &Value, ttl: Duration) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.save(key, document, ttl).await,
            Self::Sqlite(store) => store.save(key, document, ttl).await,
        }
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        match self {
            Self::Memory(store) => store.purge_expired().await,
            Self::Sqlite(store) => store.purge_expired().await,
        }
    }
}
