//! SQLite character store

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::SqlitePool;

use super::expiry;
use crate::application::ports::outbound::{CharacterStorePort, StoreError};
use crate::domain::value_objects::SessionKey;

/// One row per session; `expires_at` is Unix time in milliseconds
#[derive(Debug, Clone)]
pub struct SqliteCharacterStore {
    pool: SqlitePool,
}

impl SqliteCharacterStore {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        // Create table if not exists
        sqlx::query(r#"
            CREATE TABLE IF NOT EXISTS character_sheets (
                session_key TEXT PRIMARY KEY,
                document TEXT NOT NULL,
                expires_at INTEGER NOT NULL,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
        "#).execute(&pool).await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CharacterStorePort for SqliteCharacterStore {
    async fn load(&self, key: &SessionKey) -> Result<Option<Value>, StoreError> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT document FROM character_sheets WHERE session_key = ? AND expires_at > ?",
        )
        .bind(key.as_str())
        .bind(Utc::now().timestamp_millis())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(|(document,)| serde_json::from_str(&document))
            .transpose()
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    async fn save(&self, key: &SessionKey, document: &Value, ttl: Duration) -> Result<(), StoreError> {
        let expires_at = expiry(ttl)?.timestamp_millis();
        let document =
            serde_json::to_string(document).map_err(|e| StoreError::Serialization(e.to_string()))?;

        sqlx::query(
            "INSERT INTO character_sheets (session_key, document, expires_at, updated_at) \
             VALUES (?, ?, ?, CURRENT_TIMESTAMP) \
             ON CONFLICT(session_key) DO UPDATE SET \
             document = excluded.document, expires_at = excluded.expires_at, updated_at = CURRENT_TIMESTAMP",
        )
        .bind(key.as_str())
        .bind(document)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM character_sheets WHERE expires_at <= ?")
            .bind(Utc::now().timestamp_millis())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn store() -> SqliteCharacterStore {
        // A single connection keeps every query on the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        SqliteCharacterStore::new(pool).await.unwrap()
    }

    fn key(value: &str) -> SessionKey {
        SessionKey::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_and_load() {
        let store = store().await;
        assert_eq!(store.load(&key("a")).await.unwrap(), None);

        let ttl = Duration::from_secs(60);
        store.save(&key("a"), &json!({"name": "Valeros"}), ttl).await.unwrap();
        store.save(&key("a"), &json!({"name": "Kyra"}), ttl).await.unwrap();

        assert_eq!(store.load(&key("a")).await.unwrap(), Some(json!({"name": "Kyra"})));
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM character_sheets")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }

    #[tokio::test]
    async fn test_float_weights_survive_storage() {
        let store = store().await;
        let document = json!({"equipment": [
            {"uuid": "7f1c2d3e-0000-4000-8000-000000000001", "name": "Vial", "weight": 0.2274},
            {"uuid": "7f1c2d3e-0000-4000-8000-000000000002", "name": "Dust", "weight": 0.1 + 0.2},
        ]});
        store.save(&key("f"), &document, Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.load(&key("f")).await.unwrap(), Some(document));
    }

    #[tokio::test]
    async fn test_expired_rows_are_invisible_and_purged() {
        let store = store().await;
        store.save(&key("gone"), &json!({}), Duration::ZERO).await.unwrap();
        store
            .save(&key("kept"), &json!({}), Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(store.load(&key("gone")).await.unwrap(), None);
        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert!(store.load(&key("kept")).await.unwrap().is_some());
    }
}
