//! Armor entity - Armor and shields

use serde::{Deserialize, Serialize};

use super::Record;
use crate::domain::value_objects::{FieldSpec, FieldValue, RecordId, ResourceKind, ARMOR_TYPES};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name").required(),
    FieldSpec::text("armor_type").one_of(ARMOR_TYPES),
    FieldSpec::integer("ac_bonus").at_least(0.0),
    FieldSpec::integer("check_penalty").at_most(0.0),
    FieldSpec::integer("max_dex_bonus").at_least(0.0),
    FieldSpec::number("spell_failure").between(0.0, 100.0),
    FieldSpec::boolean("worn"),
    FieldSpec::text("notes"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Armor {
    pub uuid: RecordId,
    pub name: String,
    pub armor_type: String,
    pub ac_bonus: i64,
    /// Armor check penalty, zero or negative
    pub check_penalty: i64,
    pub max_dex_bonus: i64,
    /// Arcane spell failure chance, in percent
    pub spell_failure: f64,
    pub worn: bool,
    pub notes: String,
}

impl Default for Armor {
    fn default() -> Self {
        Self {
            uuid: RecordId::new(),
            name: String::new(),
            armor_type: "light".to_string(),
            ac_bonus: 0,
            check_penalty: 0,
            max_dex_bonus: 0,
            spell_failure: 0.0,
            worn: true,
            notes: String::new(),
        }
    }
}

impl Record for Armor {
    const KIND: ResourceKind = ResourceKind::Armor;

    fn schema() -> &'static [FieldSpec] {
        FIELDS
    }

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "name" => FieldValue::Text(&self.name),
            "armor_type" => FieldValue::Text(&self.armor_type),
            "ac_bonus" => FieldValue::Number(self.ac_bonus as f64),
            "check_penalty" => FieldValue::Number(self.check_penalty as f64),
            "max_dex_bonus" => FieldValue::Number(self.max_dex_bonus as f64),
            "spell_failure" => FieldValue::Number(self.spell_failure),
            "worn" => FieldValue::Bool(self.worn),
            "notes" => FieldValue::Text(&self.notes),
            _ => return None,
        })
    }
}
