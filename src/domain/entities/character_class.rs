//! Character class entity - A class the character has levels in

use serde::{Deserialize, Serialize};

use super::Record;
use crate::domain::value_objects::{FieldSpec, FieldValue, RecordId, ResourceKind};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name").required(),
    FieldSpec::list("archetypes"),
    FieldSpec::integer("level").between(1.0, 20.0),
    FieldSpec::integer("hit_die").between(4.0, 12.0),
    FieldSpec::integer("base_attack_bonus").at_least(0.0),
    FieldSpec::integer("skill_ranks").at_least(0.0),
    FieldSpec::integer("fortitude").at_least(0.0),
    FieldSpec::integer("reflex").at_least(0.0),
    FieldSpec::integer("will").at_least(0.0),
    FieldSpec::boolean("favored"),
    FieldSpec::text("notes"),
];

/// Levels taken in a single class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterClass {
    pub uuid: RecordId,
    pub name: String,
    pub archetypes: Vec<String>,
    pub level: i64,
    /// Size of the hit die, e.g. 8 for d8
    pub hit_die: i64,
    pub base_attack_bonus: i64,
    /// Skill ranks gained per level
    pub skill_ranks: i64,
    // Base save bonuses granted by this class
    pub fortitude: i64,
    pub reflex: i64,
    pub will: i64,
    /// Whether this is the favored class
    pub favored: bool,
    pub notes: String,
}

impl Default for CharacterClass {
    fn default() -> Self {
        Self {
            uuid: RecordId::new(),
            name: String::new(),
            archetypes: Vec::new(),
            level: 1,
            hit_die: 8,
            base_attack_bonus: 0,
            skill_ranks: 0,
            fortitude: 0,
            reflex: 0,
            will: 0,
            favored: false,
            notes: String::new(),
        }
    }
}

impl CharacterClass {
    pub fn new(name: impl Into<String>, level: i64) -> Self {
        Self {
            name: name.into(),
            level,
            ..Self::default()
        }
    }

    pub fn with_archetype(mut self, archetype: impl Into<String>) -> Self {
        self.archetypes.push(archetype.into());
        self
    }
}

impl Record for CharacterClass {
    const KIND: ResourceKind = ResourceKind::Classes;

    fn schema() -> &'static [FieldSpec] {
        FIELDS
    }

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "name" => FieldValue::Text(&self.name),
            "archetypes" => FieldValue::List(&self.archetypes),
            "level" => FieldValue::Number(self.level as f64),
            "hit_die" => FieldValue::Number(self.hit_die as f64),
            "base_attack_bonus" => FieldValue::Number(self.base_attack_bonus as f64),
            "skill_ranks" => FieldValue::Number(self.skill_ranks as f64),
            "fortitude" => FieldValue::Number(self.fortitude as f64),
            "reflex" => FieldValue::Number(self.reflex as f64),
            "will" => FieldValue::Number(self.will as f64),
            "favored" => FieldValue::Bool(self.favored),
            "notes" => FieldValue::Text(&self.notes),
            _ => return None,
        })
    }
}
