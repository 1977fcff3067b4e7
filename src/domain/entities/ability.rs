//! Ability scores and saving throws
//!
//! Both carry a `Modifier` breakdown rather than a single number.

use serde::{Deserialize, Serialize};

use super::Record;
use crate::domain::value_objects::{
    FieldSpec, FieldValue, Modifier, RecordId, ResourceKind, ABILITY_CODES, DEFAULT_ABILITY_SCORE,
    SAVE_CODES, SAVING_THROWS,
};

const ABILITY_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name").required().one_of(ABILITY_CODES),
    FieldSpec::modifier("score"),
];

const SAVE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name").required().one_of(SAVE_CODES),
    FieldSpec::text("ability").one_of(ABILITY_CODES),
    FieldSpec::modifier("bonus"),
];

/// One of the six ability scores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ability {
    pub uuid: RecordId,
    /// Ability code, e.g. `str`
    pub name: String,
    pub score: Modifier,
}

impl Ability {
    pub fn new(name: impl Into<String>, base: i64) -> Self {
        Self {
            name: name.into(),
            score: Modifier::new(base, 0),
            ..Self::default()
        }
    }
}

/// The six abilities at their default score
pub fn default_abilities() -> Vec<Ability> {
    ABILITY_CODES
        .iter()
        .map(|code| Ability::new(*code, DEFAULT_ABILITY_SCORE))
        .collect()
}

impl Record for Ability {
    const KIND: ResourceKind = ResourceKind::Abilities;

    fn schema() -> &'static [FieldSpec] {
        ABILITY_FIELDS
    }

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "name" => FieldValue::Text(&self.name),
            "score" => FieldValue::Modifier(self.score),
            _ => return None,
        })
    }
}

/// Fortitude, reflex or will
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingThrow {
    pub uuid: RecordId,
    /// Save code, e.g. `reflex`
    pub name: String,
    /// Governing ability code
    pub ability: String,
    pub bonus: Modifier,
}

impl Default for SavingThrow {
    fn default() -> Self {
        Self {
            uuid: RecordId::new(),
            name: String::new(),
            ability: "con".to_string(),
            bonus: Modifier::default(),
        }
    }
}

impl SavingThrow {
    pub fn new(name: impl Into<String>, ability: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ability: ability.into(),
            ..Self::default()
        }
    }
}

/// The three saves with no bonus
pub fn default_saving_throws() -> Vec<SavingThrow> {
    SAVING_THROWS
        .iter()
        .map(|(save, ability)| SavingThrow::new(*save, *ability))
        .collect()
}

impl Record for SavingThrow {
    const KIND: ResourceKind = ResourceKind::SavingThrows;

    fn schema() -> &'static [FieldSpec] {
        SAVE_FIELDS
    }

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "name" => FieldValue::Text(&self.name),
            "ability" => FieldValue::Text(&self.ability),
            "bonus" => FieldValue::Modifier(self.bonus),
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::merge_record;
    use serde_json::json;

    #[test]
    fn test_patching_a_modifier_replaces_it_whole() {
        let mut dex = Ability::new("dex", 14);
        dex.score.misc = 2;
        let patch = json!({"score": {"misc": 4}});
        let merged = merge_record(&dex, patch.as_object().unwrap()).unwrap();
        assert_eq!(merged.score, Modifier::new(0, 4));
    }

    #[test]
    fn test_unknown_ability_code_rejected() {
        let patch = json!({"name": "luck"});
        assert!(merge_record(&Ability::new("str", 10), patch.as_object().unwrap()).is_err());
    }

    #[test]
    fn test_default_content() {
        assert_eq!(default_abilities().len(), 6);
        let saves = default_saving_throws();
        assert_eq!(saves.len(), 3);
        assert_eq!(saves[1].name, "reflex");
        assert_eq!(saves[1].ability, "dex");
    }
}
