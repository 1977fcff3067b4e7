//! Resource collection - An ordered, identity-keyed set of records of one kind

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::AggregateError;
use crate::domain::entities::{build_record, merge_record, record_to_json, validate_record, Record};
use crate::domain::services::select;
use crate::domain::value_objects::{FilterSpec, RecordId, ResourceKind};

/// Records of one kind in insertion order
///
/// Invariant: no two records share a `uuid`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceCollection<R: Record> {
    records: Vec<R>,
}

impl<R: Record> Default for ResourceCollection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> ResourceCollection<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Adopt existing records, rejecting duplicate identities and invalid fields
    pub fn from_records(records: Vec<R>) -> Result<Self, AggregateError> {
        let mut collection = Self::new();
        for record in records {
            collection.insert(record)?;
        }
        Ok(collection)
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    pub fn get(&self, id: RecordId) -> Result<&R, AggregateError> {
        self.position(id)
            .map(|index| &self.records[index])
            .ok_or_else(|| AggregateError::not_found(R::KIND, format_args!("with uuid {}", id)))
    }

    pub fn query(&self, spec: &FilterSpec) -> Vec<&R> {
        select(&self.records, spec)
    }

    /// Append an already-built record
    pub fn insert(&mut self, record: R) -> Result<&R, AggregateError> {
        if self.position(record.id()).is_some() {
            return Err(AggregateError::validation(
                "uuid",
                format!("{} is already used in {}", record.id(), R::KIND),
            ));
        }
        validate_record(&record)?;
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Build a record from loosely-typed fields and append it
    pub fn add(&mut self, fields: &Map<String, Value>) -> Result<&R, AggregateError> {
        let record = build_record::<R>(fields)?;
        self.insert(record)
    }

    /// Merge `partial` onto the record with `id`, all or nothing
    pub fn patch(&mut self, id: RecordId, partial: &Map<String, Value>) -> Result<&R, AggregateError> {
        let index = self
            .position(id)
            .ok_or_else(|| AggregateError::not_found(R::KIND, format_args!("with uuid {}", id)))?;
        let candidate = merge_record(&self.records[index], partial)?;
        self.records[index] = candidate;
        Ok(&self.records[index])
    }

    pub fn delete(&mut self, id: RecordId) -> Result<R, AggregateError> {
        let index = self
            .position(id)
            .ok_or_else(|| AggregateError::not_found(R::KIND, format_args!("with uuid {}", id)))?;
        Ok(self.records.remove(index))
    }

    /// Delete the single record matching `spec`
    ///
    /// Refuses to guess: several matches is an error and nothing is removed.
    pub fn delete_matching(&mut self, spec: &FilterSpec) -> Result<R, AggregateError> {
        let matches: Vec<RecordId> = self.query(spec).iter().map(|r| r.id()).collect();
        match matches.as_slice() {
            [] => Err(AggregateError::not_found(R::KIND, "matches the filter")),
            [id] => self.delete(*id),
            _ => Err(AggregateError::AmbiguousMatch {
                kind: R::KIND,
                count: matches.len(),
            }),
        }
    }
}

/// Records generated in code; a repeated identity keeps its first occurrence
impl<R: Record> FromIterator<R> for ResourceCollection<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut collection = Self::new();
        for record in iter {
            if collection.position(record.id()).is_none() {
                collection.records.push(record);
            }
        }
        collection
    }
}

impl<R: Record> Serialize for ResourceCollection<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}

impl<'de, R: Record> Deserialize<'de> for ResourceCollection<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let records = Vec::<R>::deserialize(deserializer)?;
        Self::from_records(records).map_err(serde::de::Error::custom)
    }
}

/// Kind-erased view of a collection, used to dispatch by `ResourceKind`
///
/// Records cross this boundary as JSON objects.
pub trait DynCollection: Send + Sync {
    fn kind(&self) -> ResourceKind;

    fn record_count(&self) -> usize;

    fn query_json(&self, spec: &FilterSpec) -> Result<Vec<Value>, AggregateError>;

    fn get_json(&self, id: RecordId) -> Result<Value, AggregateError>;

    fn add_json(&mut self, fields: &Map<String, Value>) -> Result<Value, AggregateError>;

    fn patch_json(&mut self, id: RecordId, partial: &Map<String, Value>) -> Result<Value, AggregateError>;

    fn delete_json(&mut self, id: RecordId) -> Result<Value, AggregateError>;

    fn delete_matching_json(&mut self, spec: &FilterSpec) -> Result<Value, AggregateError>;
}

impl<R: Record> DynCollection for ResourceCollection<R> {
    fn kind(&self) -> ResourceKind {
        R::KIND
    }

    fn record_count(&self) -> usize {
        self.len()
    }

    fn query_json(&self, spec: &FilterSpec) -> Result<Vec<Value>, AggregateError> {
        self.query(spec).into_iter().map(record_to_json).collect()
    }

    fn get_json(&self, id: RecordId) -> Result<Value, AggregateError> {
        self.get(id).and_then(record_to_json)
    }

    fn add_json(&mut self, fields: &Map<String, Value>) -> Result<Value, AggregateError> {
        self.add(fields).and_then(record_to_json)
    }

    fn patch_json(&mut self, id: RecordId, partial: &Map<String, Value>) -> Result<Value, AggregateError> {
        self.patch(id, partial).and_then(record_to_json)
    }

    fn delete_json(&mut self, id: RecordId) -> Result<Value, AggregateError> {
        self.delete(id).and_then(|record| record_to_json(&record))
    }

    fn delete_matching_json(&mut self, spec: &FilterSpec) -> Result<Value, AggregateError> {
        self.delete_matching(spec).and_then(|record| record_to_json(&record))
    }
}
