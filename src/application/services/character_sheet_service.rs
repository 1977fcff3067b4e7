//! Character Sheet Service - Application service for character sheets
//!
//! Each call resolves the sheet stored under a session key, runs one
//! aggregate operation and, for writes, stores the resulting snapshot again.
//! A session without a stored sheet starts from the configured template.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, instrument};

use crate::application::ports::outbound::{CharacterStorePort, StoreError};
use crate::domain::aggregates::{AggregateError, CharacterSheet};
use crate::domain::value_objects::{Attribute, FilterSpec, RecordId, ResourceKind, SessionKey};

#[derive(Debug, thiserror::Error)]
pub enum SheetServiceError {
    #[error(transparent)]
    Domain(#[from] AggregateError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Character sheet use cases
#[async_trait]
pub trait CharacterSheetService: Send + Sync {
    /// Full snapshot of the session's sheet
    async fn get_sheet(&self, session: &SessionKey) -> Result<Value, SheetServiceError>;

    /// Replace the session's sheet with a supplied snapshot
    async fn replace_sheet(&self, session: &SessionKey, document: Value) -> Result<Value, SheetServiceError>;

    /// Start the session over from the template
    async fn reset_sheet(&self, session: &SessionKey) -> Result<Value, SheetServiceError>;

    async fn get_attribute(&self, session: &SessionKey, attribute: Attribute) -> Result<Value, SheetServiceError>;

    async fn set_attribute(
        &self,
        session: &SessionKey,
        attribute: Attribute,
        value: Value,
    ) -> Result<Value, SheetServiceError>;

    async fn list_records(
        &self,
        session: &SessionKey,
        kind: ResourceKind,
        spec: &FilterSpec,
    ) -> Result<Vec<Value>, SheetServiceError>;

    async fn get_record(&self, session: &SessionKey, kind: ResourceKind, id: RecordId) -> Result<Value, SheetServiceError>;

    async fn add_record(
        &self,
        session: &SessionKey,
        kind: ResourceKind,
        fields: Map<String, Value>,
    ) -> Result<Value, SheetServiceError>;

    async fn patch_record(
        &self,
        session: &SessionKey,
        kind: ResourceKind,
        id: RecordId,
        partial: Map<String, Value>,
    ) -> Result<Value, SheetServiceError>;

    async fn delete_record(&self, session: &SessionKey, kind: ResourceKind, id: RecordId) -> Result<Value, SheetServiceError>;

    /// Delete the single record matching `spec`
    async fn delete_matching(
        &self,
        session: &SessionKey,
        kind: ResourceKind,
        spec: FilterSpec,
    ) -> Result<Value, SheetServiceError>;
}

/// Default implementation of CharacterSheetService over a character store
pub struct CharacterSheetServiceImpl {
    store: Arc<dyn CharacterStorePort>,
    template: CharacterSheet,
    ttl: Duration,
    /// One lock per session so concurrent writes in this process never
    /// interleave their load and save
    locks: Mutex<HashMap<SessionKey, Arc<Mutex<()>>>>,
}

impl CharacterSheetServiceImpl {
    pub fn new(store: Arc<dyn CharacterStorePort>, template: CharacterSheet, ttl: Duration) -> Self {
        Self {
            store,
            template,
            ttl,
            locks: Mutex::new(HashMap::new()),
        }
    }

    async fn lock_session(&self, session: &SessionKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Locks nobody else holds are idle
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(session.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }

    async fn load(&self, session: &SessionKey) -> Result<CharacterSheet, SheetServiceError> {
        match self.store.load(session).await? {
            Some(document) => Ok(CharacterSheet::restore(document)?),
            None => {
                debug!(session = %session, "No stored sheet, using template");
                Ok(self.template.clone())
            }
        }
    }

    async fn save(&self, session: &SessionKey, sheet: &CharacterSheet) -> Result<Value, SheetServiceError> {
        let document = sheet.snapshot()?;
        self.store.save(session, &document, self.ttl).await?;
        Ok(document)
    }

    /// Load, apply `operation` and store the result; nothing is stored when
    /// the operation fails
    async fn mutate<T, F>(&self, session: &SessionKey, operation: F) -> Result<T, SheetServiceError>
    where
        T: Send,
        F: FnOnce(&mut CharacterSheet) -> Result<T, AggregateError> + Send,
    {
        let _guard = self.lock_session(session).await;
        let mut sheet = self.load(session).await?;
        let output = operation(&mut sheet)?;
        self.save(session, &sheet).await?;
        Ok(output)
    }
}

#[async_trait]
impl CharacterSheetService for CharacterSheetServiceImpl {
    #[instrument(skip(self), fields(session = %session))]
    async fn get_sheet(&self, session: &SessionKey) -> Result<Value, SheetServiceError> {
        Ok(self.load(session).await?.snapshot()?)
    }

    #[instrument(skip(self, document), fields(session = %session))]
    async fn replace_sheet(&self, session: &SessionKey, document: Value) -> Result<Value, SheetServiceError> {
        let sheet = CharacterSheet::restore(document)?;
        let _guard = self.lock_session(session).await;
        let document = self.save(session, &sheet).await?;
        info!(session = %session, "Replaced character sheet");
        Ok(document)
    }

    #[instrument(skip(self), fields(session = %session))]
    async fn reset_sheet(&self, session: &SessionKey) -> Result<Value, SheetServiceError> {
        let _guard = self.lock_session(session).await;
        let document = self.save(session, &self.template).await?;
        info!(session = %session, "Reset character sheet");
        Ok(document)
    }

    #[instrument(skip(self), fields(session = %session))]
    async fn get_attribute(&self, session: &SessionKey, attribute: Attribute) -> Result<Value, SheetServiceError> {
        Ok(self.load(session).await?.get_attribute(attribute)?)
    }

    #[instrument(skip(self, value), fields(session = %session))]
    async fn set_attribute(
        &self,
        session: &SessionKey,
        attribute: Attribute,
        value: Value,
    ) -> Result<Value, SheetServiceError> {
        let updated = self
            .mutate(session, |sheet| {
                sheet.set_attribute(attribute, value)?;
                sheet.get_attribute(attribute)
            })
            .await?;
        info!(session = %session, attribute = %attribute, "Updated attribute");
        Ok(updated)
    }

    #[instrument(skip(self, spec), fields(session = %session, filters = spec.len()))]
    async fn list_records(
        &self,
        session: &SessionKey,
        kind: ResourceKind,
        spec: &FilterSpec,
    ) -> Result<Vec<Value>, SheetServiceError> {
        let records = self.load(session).await?.query_records(kind, spec)?;
        debug!(kind = %kind, matched = records.len(), "Queried records");
        Ok(records)
    }

    #[instrument(skip(self), fields(session = %session))]
    async fn get_record(&self, session: &SessionKey, kind: ResourceKind, id: RecordId) -> Result<Value, SheetServiceError> {
        Ok(self.load(session).await?.get_record(kind, id)?)
    }

    #[instrument(skip(self, fields), fields(session = %session))]
    async fn add_record(
        &self,
        session: &SessionKey,
        kind: ResourceKind,
        fields: Map<String, Value>,
    ) -> Result<Value, SheetServiceError> {
        let record = self
            .mutate(session, |sheet| sheet.add_record(kind, &fields))
            .await?;
        info!(session = %session, kind = %kind, uuid = ?record.get("uuid"), "Added record");
        Ok(record)
    }

    #[instrument(skip(self, partial), fields(session = %session))]
    async fn patch_record(
        &self,
        session: &SessionKey,
        kind: ResourceKind,
        id: RecordId,
        partial: Map<String, Value>,
    ) -> Result<Value, SheetServiceError> {
        let record = self
            .mutate(session, |sheet| sheet.patch_record(kind, id, &partial))
            .await?;
        info!(session = %session, kind = %kind, uuid = %id, "Patched record");
        Ok(record)
    }

    #[instrument(skip(self), fields(session = %session))]
    async fn delete_record(&self, session: &SessionKey, kind: ResourceKind, id: RecordId) -> Result<Value, SheetServiceError> {
        let record = self
            .mutate(session, |sheet| sheet.delete_record(kind, id))
            .await?;
        info!(session = %session, kind = %kind, uuid = %id, "Deleted record");
        Ok(record)
    }

    #[instrument(skip(self, spec), fields(session = %session))]
    async fn delete_matching(
        &self,
        session: &SessionKey,
        kind: ResourceKind,
        spec: FilterSpec,
    ) -> Result<Value, SheetServiceError> {
        let record = self
            .mutate(session, |sheet| sheet.delete_matching(kind, &spec))
            .await?;
        info!(session = %session, kind = %kind, uuid = ?record.get("uuid"), "Deleted matching record");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::MockCharacterStorePort;
    use crate::domain::value_objects::NumericRange;
    use mockall::predicate::*;
    use serde_json::json;

    const TTL: Duration = Duration::from_secs(60);

    fn session() -> SessionKey {
        SessionKey::new("table-1").unwrap()
    }

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn stored_sheet() -> Value {
        let mut sheet = CharacterSheet::default();
        sheet
            .add_record(ResourceKind::Equipment, &fields(json!({"name": "Sword", "weight": 5})))
            .unwrap();
        sheet
            .add_record(ResourceKind::Equipment, &fields(json!({"name": "Shield", "weight": 10})))
            .unwrap();
        sheet.snapshot().unwrap()
    }

    fn service(store: MockCharacterStorePort) -> CharacterSheetServiceImpl {
        CharacterSheetServiceImpl::new(Arc::new(store), CharacterSheet::blank(), TTL)
    }

    #[tokio::test]
    async fn test_read_on_miss_uses_template_without_saving() {
        let mut store = MockCharacterStorePort::new();
        store
            .expect_load()
            .with(eq(session()))
            .returning(|_| Ok(None));

        let sheet = service(store).get_sheet(&session()).await.unwrap();
        assert_eq!(sheet["abilities"].as_array().map(Vec::len), Some(6));
        assert_eq!(sheet["skills"].as_array().map(Vec::len), Some(35));
    }

    #[tokio::test]
    async fn test_add_saves_snapshot_with_ttl() {
        let mut store = MockCharacterStorePort::new();
        store.expect_load().returning(|_| Ok(Some(stored_sheet())));
        store
            .expect_save()
            .withf(|key, document, ttl| {
                key.as_str() == "table-1"
                    && document["equipment"].as_array().map(Vec::len) == Some(3)
                    && *ttl == TTL
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let record = service(store)
            .add_record(&session(), ResourceKind::Equipment, fields(json!({"name": "Rope"})))
            .await
            .unwrap();
        assert_eq!(record["name"], json!("Rope"));
        assert_eq!(record["count"], json!(1));
    }

    #[tokio::test]
    async fn test_failed_write_is_not_saved() {
        let mut store = MockCharacterStorePort::new();
        store.expect_load().returning(|_| Ok(Some(stored_sheet())));
        store.expect_save().never();

        let service = service(store);
        let err = service
            .add_record(&session(), ResourceKind::Equipment, fields(json!({"weight": -1})))
            .await
            .unwrap_err();
        assert!(matches!(err, SheetServiceError::Domain(AggregateError::Validation { .. })));

        let spec = FilterSpec::new().range("weight", NumericRange::at_least(1.0));
        let err = service
            .delete_matching(&session(), ResourceKind::Equipment, spec)
            .await
            .unwrap_err();
        assert!(matches!(err, SheetServiceError::Domain(AggregateError::AmbiguousMatch { count: 2, .. })));
    }

    #[tokio::test]
    async fn test_list_records_filters_stored_sheet() {
        let mut store = MockCharacterStorePort::new();
        store.expect_load().returning(|_| Ok(Some(stored_sheet())));

        let spec = FilterSpec::new().range("weight", NumericRange::at_least(6.0));
        let records = service(store)
            .list_records(&session(), ResourceKind::Equipment, &spec)
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], json!("Shield"));
    }

    #[tokio::test]
    async fn test_store_errors_surface() {
        let mut store = MockCharacterStorePort::new();
        store
            .expect_load()
            .returning(|_| Err(StoreError::Database("disk full".into())));

        let err = service(store).get_sheet(&session()).await.unwrap_err();
        assert!(matches!(err, SheetServiceError::Store(StoreError::Database(_))));
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_malformed() {
        let mut store = MockCharacterStorePort::new();
        store
            .expect_load()
            .returning(|_| Ok(Some(json!({"alignment": "Good"}))));

        let err = service(store).get_sheet(&session()).await.unwrap_err();
        assert!(matches!(err, SheetServiceError::Domain(AggregateError::MalformedInput(_))));
    }

    #[tokio::test]
    async fn test_set_attribute_returns_stored_value() {
        let mut store = MockCharacterStorePort::new();
        store.expect_load().returning(|_| Ok(None));
        store
            .expect_save()
            .withf(|_, document, _| document["alignment"] == json!("CG"))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let value = service(store)
            .set_attribute(&session(), Attribute::Alignment, json!("CG"))
            .await
            .unwrap();
        assert_eq!(value, json!("CG"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes_to_one_session_all_survive() {
        use crate::infrastructure::persistence::InMemoryCharacterStore;

        let service = Arc::new(CharacterSheetServiceImpl::new(
            Arc::new(InMemoryCharacterStore::new()),
            CharacterSheet::default(),
            TTL,
        ));

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .add_record(&session(), ResourceKind::Equipment, fields(json!({"name": format!("Pack {n}")})))
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let records = service
            .list_records(&session(), ResourceKind::Equipment, &FilterSpec::new())
            .await
            .unwrap();
        assert_eq!(records.len(), 8);

        // Taking another session's lock drops the idle one
        let other = SessionKey::new("table-2").unwrap();
        let _guard = service.lock_session(&other).await;
        let locks = service.locks.lock().await;
        assert!(!locks.contains_key(&session()));
        assert!(locks.contains_key(&other));
    }
}
