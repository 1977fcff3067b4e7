//! Spell entity - Spells known or prepared

use serde::{Deserialize, Serialize};

use super::Record;
use crate::domain::value_objects::{FieldSpec, FieldValue, RecordId, ResourceKind, SPELL_SCHOOLS};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name").required(),
    FieldSpec::integer("level").between(0.0, 9.0),
    FieldSpec::text("school").one_of(SPELL_SCHOOLS),
    FieldSpec::text("description"),
    FieldSpec::integer("prepared").at_least(0.0),
    FieldSpec::integer("cast").at_least(0.0),
    FieldSpec::text("notes"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spell {
    pub uuid: RecordId,
    pub name: String,
    pub level: i64,
    pub school: String,
    pub description: String,
    /// Number of times prepared today
    pub prepared: i64,
    /// Number of times cast today
    pub cast: i64,
    pub notes: String,
}

impl Default for Spell {
    fn default() -> Self {
        Self {
            uuid: RecordId::new(),
            name: String::new(),
            level: 0,
            school: "universal".to_string(),
            description: String::new(),
            prepared: 0,
            cast: 0,
            notes: String::new(),
        }
    }
}

impl Spell {
    pub fn new(name: impl Into<String>, level: i64) -> Self {
        Self {
            name: name.into(),
            level,
            ..Self::default()
        }
    }

    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.school = school.into();
        self
    }
}

impl Record for Spell {
    const KIND: ResourceKind = ResourceKind::Spells;

    fn schema() -> &'static [FieldSpec] {
        FIELDS
    }

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "name" => FieldValue::Text(&self.name),
            "level" => FieldValue::Number(self.level as f64),
            "school" => FieldValue::Text(&self.school),
            "description" => FieldValue::Text(&self.description),
            "prepared" => FieldValue::Number(self.prepared as f64),
            "cast" => FieldValue::Number(self.cast as f64),
            "notes" => FieldValue::Text(&self.notes),
            _ => return None,
        })
    }
}
