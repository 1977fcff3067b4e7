//! Equipment entity - Gear carried, stowed at camp, or stored elsewhere

use serde::{Deserialize, Serialize};

use super::Record;
use crate::domain::value_objects::{FieldSpec, FieldValue, RecordId, ResourceKind};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name").required(),
    FieldSpec::number("weight").at_least(0.0),
    FieldSpec::integer("count").at_least(0.0),
    FieldSpec::boolean("camp"),
    FieldSpec::boolean("on_person"),
    FieldSpec::text("location"),
    FieldSpec::text("notes"),
];

/// One line of the inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    pub uuid: RecordId,
    pub name: String,
    /// Weight of a single unit, in pounds
    pub weight: f64,
    pub count: i64,
    /// Left behind at camp
    pub camp: bool,
    pub on_person: bool,
    /// Where the item is kept (backpack, belt pouch, ...)
    pub location: String,
    pub notes: String,
}

impl Default for Equipment {
    fn default() -> Self {
        Self {
            uuid: RecordId::new(),
            name: String::new(),
            weight: 0.0,
            count: 1,
            camp: false,
            on_person: true,
            location: String::new(),
            notes: String::new(),
        }
    }
}

impl Equipment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_count(mut self, count: i64) -> Self {
        self.count = count;
        self
    }

    pub fn at_camp(mut self) -> Self {
        self.camp = true;
        self.on_person = false;
        self
    }
}

impl Record for Equipment {
    const KIND: ResourceKind = ResourceKind::Equipment;

    fn schema() -> &'static [FieldSpec] {
        FIELDS
    }

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "name" => FieldValue::Text(&self.name),
            "weight" => FieldValue::Number(self.weight),
            "count" => FieldValue::Number(self.count as f64),
            "camp" => FieldValue::Bool(self.camp),
            "on_person" => FieldValue::Bool(self.on_person),
            "location" => FieldValue::Text(&self.location),
            "notes" => FieldValue::Text(&self.notes),
            _ => return None,
        })
    }
}
