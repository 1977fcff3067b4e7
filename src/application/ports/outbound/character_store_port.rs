//! Character store port - Where character snapshots live between requests

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::value_objects::SessionKey;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Key-value store of character snapshots with expiry
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterStorePort: Send + Sync {
    /// The stored snapshot, or `None` when absent or expired
    async fn load(&self, key: &SessionKey) -> Result<Option<Value>, StoreError>;

    /// Insert or replace the snapshot; it expires `ttl` after this call
    async fn save(&self, key: &SessionKey, document: &Value, ttl: Duration) -> Result<(), StoreError>;

    /// Drop every expired snapshot, returning how many were removed
    async fn purge_expired(&self) -> Result<u64, StoreError>;
}
