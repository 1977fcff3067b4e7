//! Attack entity - Weapon and special attacks

use serde::{Deserialize, Serialize};

use super::Record;
use crate::domain::value_objects::{FieldSpec, FieldValue, RecordId, ResourceKind, ATTACK_TYPES};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name").required(),
    FieldSpec::text("attack_type").one_of(ATTACK_TYPES),
    FieldSpec::text("damage"),
    FieldSpec::list("damage_types"),
    FieldSpec::integer("critical_range").between(2.0, 20.0),
    FieldSpec::integer("critical_multiplier").between(2.0, 5.0),
    FieldSpec::integer("range").at_least(0.0),
    FieldSpec::text("notes"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attack {
    pub uuid: RecordId,
    pub name: String,
    pub attack_type: String,
    /// Damage dice, e.g. `1d8+1`
    pub damage: String,
    pub damage_types: Vec<String>,
    /// Lowest natural roll that threatens a critical
    pub critical_range: i64,
    pub critical_multiplier: i64,
    /// Range increment in feet, zero for melee
    pub range: i64,
    pub notes: String,
}

impl Default for Attack {
    fn default() -> Self {
        Self {
            uuid: RecordId::new(),
            name: String::new(),
            attack_type: "melee".to_string(),
            damage: String::new(),
            damage_types: Vec::new(),
            critical_range: 20,
            critical_multiplier: 2,
            range: 0,
            notes: String::new(),
        }
    }
}

impl Record for Attack {
    const KIND: ResourceKind = ResourceKind::Attacks;

    fn schema() -> &'static [FieldSpec] {
        FIELDS
    }

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "name" => FieldValue::Text(&self.name),
            "attack_type" => FieldValue::Text(&self.attack_type),
            "damage" => FieldValue::Text(&self.damage),
            "damage_types" => FieldValue::List(&self.damage_types),
            "critical_range" => FieldValue::Number(self.critical_range as f64),
            "critical_multiplier" => FieldValue::Number(self.critical_multiplier as f64),
            "range" => FieldValue::Number(self.range as f64),
            "notes" => FieldValue::Text(&self.notes),
            _ => return None,
        })
    }
}
