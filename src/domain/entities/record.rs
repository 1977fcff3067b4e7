//! The `Record` trait and the schema-driven construction of records
//!
//! Records are built and patched the same way regardless of kind: the
//! current record is flattened to a JSON object, the supplied fields are
//! laid over it, every declared field is coerced and validated, and only
//! then is a new typed record deserialized. Nothing is mutated until the
//! whole candidate is known to be valid.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::aggregates::AggregateError;
use crate::domain::value_objects::{
    find_field, FieldSpec, FieldValue, RecordId, ResourceKind, UUID_FIELD,
};

/// An identity-bearing entry of a resource collection
pub trait Record:
    Serialize + DeserializeOwned + Clone + Default + Debug + PartialEq + Send + Sync + 'static
{
    const KIND: ResourceKind;

    /// Declared fields, excluding `uuid`
    fn schema() -> &'static [FieldSpec];

    fn id(&self) -> RecordId;

    /// Value of a declared field, `None` for unknown names
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// Flatten a record into its JSON field mapping
fn record_to_fields<R: Record>(record: &R) -> Result<Map<String, Value>, AggregateError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(AggregateError::Serialization(format!(
            "{} record serialized to {} instead of an object",
            R::KIND,
            other
        ))),
        Err(e) => Err(AggregateError::Serialization(e.to_string())),
    }
}

/// Serialize a record for the wire
pub fn record_to_json<R: Record>(record: &R) -> Result<Value, AggregateError> {
    serde_json::to_value(record).map_err(|e| AggregateError::Serialization(e.to_string()))
}

/// Build a brand new record from supplied fields
///
/// Fields that are not supplied take the kind's defaults. The identity comes
/// from `R::default()`, which generates a fresh one, and may not be supplied.
pub fn build_record<R: Record>(fields: &Map<String, Value>) -> Result<R, AggregateError> {
    if fields.contains_key(UUID_FIELD) {
        return Err(AggregateError::validation(
            UUID_FIELD,
            "is assigned on creation and cannot be supplied",
        ));
    }
    merge_record(&R::default(), fields)
}

/// Lay `partial` over `existing` and validate the result
///
/// Pure: `existing` is never touched. A supplied `uuid` is accepted only if
/// it equals the existing identity.
pub fn merge_record<R: Record>(
    existing: &R,
    partial: &Map<String, Value>,
) -> Result<R, AggregateError> {
    let mut fields = record_to_fields(existing)?;

    for (key, value) in partial {
        if key == UUID_FIELD {
            let same_identity = value
                .as_str()
                .and_then(|s| RecordId::parse(s).ok())
                .is_some_and(|id| id == existing.id());
            if !same_identity {
                return Err(AggregateError::validation(UUID_FIELD, "cannot be reassigned"));
            }
            continue;
        }
        if find_field(R::schema(), key).is_none() {
            return Err(AggregateError::validation(
                key.as_str(),
                format!("is not a field of {}", R::KIND),
            ));
        }
        fields.insert(key.clone(), value.clone());
    }

    for spec in R::schema() {
        let value = fields.remove(spec.name).unwrap_or(Value::Null);
        fields.insert(spec.name.to_string(), spec.coerce(value)?);
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| AggregateError::Serialization(e.to_string()))
}

/// Check an already-typed record against its schema
pub fn validate_record<R: Record>(record: &R) -> Result<(), AggregateError> {
    merge_record(record, &Map::new()).map(|_| ())
}
