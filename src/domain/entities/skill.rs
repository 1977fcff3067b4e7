//! Skill entity - Ranks invested in a skill

use serde::{Deserialize, Serialize};

use super::Record;
use crate::domain::value_objects::{
    FieldSpec, FieldValue, RecordId, ResourceKind, ABILITY_CODES, CORE_SKILLS,
};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name").required(),
    FieldSpec::text("ability").required().one_of(ABILITY_CODES),
    FieldSpec::integer("rank").at_least(0.0),
    FieldSpec::boolean("class_skill"),
    FieldSpec::boolean("use_untrained"),
    FieldSpec::integer("misc"),
    FieldSpec::text("notes"),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub uuid: RecordId,
    pub name: String,
    /// Governing ability code
    pub ability: String,
    pub rank: i64,
    pub class_skill: bool,
    pub use_untrained: bool,
    pub misc: i64,
    pub notes: String,
}

impl Skill {
    pub fn new(name: impl Into<String>, ability: impl Into<String>, use_untrained: bool) -> Self {
        Self {
            name: name.into(),
            ability: ability.into(),
            use_untrained,
            ..Self::default()
        }
    }

    pub fn with_rank(mut self, rank: i64) -> Self {
        self.rank = rank;
        self
    }

    pub fn as_class_skill(mut self) -> Self {
        self.class_skill = true;
        self
    }
}

/// The core skill list with no ranks
pub fn core_skills() -> Vec<Skill> {
    CORE_SKILLS
        .iter()
        .map(|(name, ability, untrained)| Skill::new(*name, *ability, *untrained))
        .collect()
}

impl Record for Skill {
    const KIND: ResourceKind = ResourceKind::Skills;

    fn schema() -> &'static [FieldSpec] {
        FIELDS
    }

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "name" => FieldValue::Text(&self.name),
            "ability" => FieldValue::Text(&self.ability),
            "rank" => FieldValue::Number(self.rank as f64),
            "class_skill" => FieldValue::Bool(self.class_skill),
            "use_untrained" => FieldValue::Bool(self.use_untrained),
            "misc" => FieldValue::Number(self.misc as f64),
            "notes" => FieldValue::Text(&self.notes),
            _ => return None,
        })
    }
}
