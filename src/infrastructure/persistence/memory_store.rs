//! In-process character store

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;

use super::expiry;
use crate::application::ports::outbound::{CharacterStorePort, StoreError};
use crate::domain::value_objects::SessionKey;

#[derive(Debug, Clone)]
struct StoredSheet {
    document: Value,
    expires_at: DateTime<Utc>,
}

impl StoredSheet {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Sheets kept in memory; lost on restart
#[derive(Debug, Clone, Default)]
pub struct InMemoryCharacterStore {
    sheets: Arc<RwLock<HashMap<SessionKey, StoredSheet>>>,
}

impl InMemoryCharacterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CharacterStorePort for InMemoryCharacterStore {
    async fn load(&self, key: &SessionKey) -> Result<Option<Value>, StoreError> {
        let sheets = self.sheets.read().await;
        Ok(sheets
            .get(key)
            .filter(|sheet| sheet.is_live(Utc::now()))
            .map(|sheet| sheet.document.clone()))
    }

    async fn save(&self, key: &SessionKey, document: &Value, ttl: Duration) -> Result<(), StoreError> {
        let stored = StoredSheet {
            document: document.clone(),
            expires_at: expiry(ttl)?,
        };
        self.sheets.write().await.insert(key.clone(), stored);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        let now = Utc::now();
        let mut sheets = self.sheets.write().await;
        let before = sheets.len();
        sheets.retain(|_, sheet| sheet.is_live(now));
        Ok((before - sheets.len()) as u64)
    }
}
