//! Character Sheet Aggregate - The root aggregate for one character
//!
//! A sheet holds the scalar attributes of a character and one resource
//! collection per record kind. It is loaded from, and written back to, the
//! external store as a single JSON snapshot.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{AggregateError, DynCollection, ResourceCollection};
use crate::domain::entities::{
    core_skills, default_abilities, default_saving_throws, Ability, Armor, Attack, CharacterClass,
    Equipment, Feat, SavingThrow, Skill, Special, Spell, Trait,
};
use crate::domain::value_objects::{
    Alignment, Attribute, FilterSpec, HitPoints, Money, RecordId, ResourceKind, Size,
};

const MAX_NAME_LENGTH: usize = 255;
const MAX_TEXT_LENGTH: usize = 10_000;

/// The Character Sheet Aggregate Root
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterSheet {
    // Identity and background
    pub name: String,
    pub player: String,
    pub race: String,
    pub deity: String,
    pub homeland: String,
    pub alignment: Alignment,
    pub description: String,

    // Physical traits
    pub gender: String,
    pub age: u32,
    pub size: Size,
    pub height: String,
    pub weight: String,
    pub hair: String,
    pub eyes: String,
    pub languages: Vec<String>,

    // Progress and combat
    pub experience: u64,
    pub hit_points: HitPoints,
    /// Base land speed in feet
    pub speed: u32,
    pub money: Money,

    // Collections
    pub equipment: ResourceCollection<Equipment>,
    pub classes: ResourceCollection<CharacterClass>,
    pub feats: ResourceCollection<Feat>,
    pub traits: ResourceCollection<Trait>,
    pub specials: ResourceCollection<Special>,
    pub skills: ResourceCollection<Skill>,
    pub spells: ResourceCollection<Spell>,
    pub armor: ResourceCollection<Armor>,
    pub attacks: ResourceCollection<Attack>,
    pub abilities: ResourceCollection<Ability>,
    pub saving_throws: ResourceCollection<SavingThrow>,
}

impl CharacterSheet {
    /// A new character as the rules hand it out: six abilities at their
    /// default score, the three saves and the core skill list
    pub fn blank() -> Self {
        Self {
            speed: 30,
            abilities: default_abilities().into_iter().collect(),
            saving_throws: default_saving_throws().into_iter().collect(),
            skills: core_skills().into_iter().collect(),
            ..Self::default()
        }
    }

    // ========================================================================
    // Snapshot
    // ========================================================================

    /// Reduce the whole sheet to one JSON document
    pub fn snapshot(&self) -> Result<Value, AggregateError> {
        serde_json::to_value(self).map_err(|e| AggregateError::Serialization(e.to_string()))
    }

    /// Rebuild a sheet from a document produced by [`CharacterSheet::snapshot`]
    ///
    /// Missing keys take their defaults. Duplicate identities, invalid
    /// records or over-long text reject the whole document.
    pub fn restore(document: Value) -> Result<Self, AggregateError> {
        if !document.is_object() {
            return Err(AggregateError::MalformedInput(
                "character document must be a JSON object".to_string(),
            ));
        }
        let sheet: Self = serde_json::from_value(document)
            .map_err(|e| AggregateError::MalformedInput(format!("invalid character document: {}", e)))?;
        sheet.check_text_lengths()?;
        Ok(sheet)
    }

    /// Length limits shared by `restore` and `set_attribute`
    fn check_text_lengths(&self) -> Result<(), AggregateError> {
        check_length(Attribute::Name, &self.name, MAX_NAME_LENGTH)?;
        let texts = [
            (Attribute::Player, &self.player),
            (Attribute::Race, &self.race),
            (Attribute::Deity, &self.deity),
            (Attribute::Homeland, &self.homeland),
            (Attribute::Gender, &self.gender),
            (Attribute::Height, &self.height),
            (Attribute::Weight, &self.weight),
            (Attribute::Hair, &self.hair),
            (Attribute::Eyes, &self.eyes),
            (Attribute::Description, &self.description),
        ];
        for (attribute, text) in texts {
            check_length(attribute, text, MAX_TEXT_LENGTH)?;
        }
        Ok(())
    }

    // ========================================================================
    // Scalar attributes
    // ========================================================================

    pub fn get_attribute(&self, attribute: Attribute) -> Result<Value, AggregateError> {
        let value = match attribute {
            Attribute::Name => serde_json::to_value(&self.name),
            Attribute::Player => serde_json::to_value(&self.player),
            Attribute::Race => serde_json::to_value(&self.race),
            Attribute::Deity => serde_json::to_value(&self.deity),
            Attribute::Homeland => serde_json::to_value(&self.homeland),
            Attribute::Alignment => serde_json::to_value(self.alignment),
            Attribute::Gender => serde_json::to_value(&self.gender),
            Attribute::Age => serde_json::to_value(self.age),
            Attribute::Size => serde_json::to_value(self.size),
            Attribute::Height => serde_json::to_value(&self.height),
            Attribute::Weight => serde_json::to_value(&self.weight),
            Attribute::Hair => serde_json::to_value(&self.hair),
            Attribute::Eyes => serde_json::to_value(&self.eyes),
            Attribute::Description => serde_json::to_value(&self.description),
            Attribute::Languages => serde_json::to_value(&self.languages),
            Attribute::Experience => serde_json::to_value(self.experience),
            Attribute::HitPoints => serde_json::to_value(self.hit_points),
            Attribute::Speed => serde_json::to_value(self.speed),
            Attribute::Money => serde_json::to_value(self.money),
        };
        value.map_err(|e| AggregateError::Serialization(e.to_string()))
    }

    /// Set one scalar; on error the sheet is untouched
    ///
    /// Writing back the value the sheet already holds always succeeds, so a
    /// restored or default sheet can round-trip its own attributes.
    pub fn set_attribute(&mut self, attribute: Attribute, value: Value) -> Result<(), AggregateError> {
        if self.get_attribute(attribute)? == value {
            return Ok(());
        }
        match attribute {
            Attribute::Name => self.name = parse_name(attribute, value)?,
            Attribute::Player => self.player = parse_text(attribute, value)?,
            Attribute::Race => self.race = parse_text(attribute, value)?,
            Attribute::Deity => self.deity = parse_text(attribute, value)?,
            Attribute::Homeland => self.homeland = parse_text(attribute, value)?,
            Attribute::Alignment => self.alignment = parse_typed(attribute, value)?,
            Attribute::Gender => self.gender = parse_text(attribute, value)?,
            Attribute::Age => self.age = parse_typed(attribute, value)?,
            Attribute::Size => self.size = parse_typed(attribute, value)?,
            Attribute::Height => self.height = parse_text(attribute, value)?,
            Attribute::Weight => self.weight = parse_text(attribute, value)?,
            Attribute::Hair => self.hair = parse_text(attribute, value)?,
            Attribute::Eyes => self.eyes = parse_text(attribute, value)?,
            Attribute::Description => self.description = parse_text(attribute, value)?,
            Attribute::Languages => self.languages = parse_typed(attribute, value)?,
            Attribute::Experience => self.experience = parse_typed(attribute, value)?,
            Attribute::HitPoints => self.hit_points = parse_typed(attribute, value)?,
            Attribute::Speed => self.speed = parse_typed(attribute, value)?,
            Attribute::Money => self.money = parse_typed(attribute, value)?,
        }
        Ok(())
    }

    // ========================================================================
    // Collections
    // ========================================================================

    pub fn collection(&self, kind: ResourceKind) -> &dyn DynCollection {
        match kind {
            ResourceKind::Equipment => &self.equipment,
            ResourceKind::Classes => &self.classes,
            ResourceKind::Feats => &self.feats,
            ResourceKind::Traits => &self.traits,
            ResourceKind::Specials => &self.specials,
            ResourceKind::Skills => &self.skills,
            ResourceKind::Spells => &self.spells,
            ResourceKind::Armor => &self.armor,
            ResourceKind::Attacks => &self.attacks,
            ResourceKind::Abilities => &self.abilities,
            ResourceKind::SavingThrows => &self.saving_throws,
        }
    }

    pub fn collection_mut(&mut self, kind: ResourceKind) -> &mut dyn DynCollection {
        match kind {
            ResourceKind::Equipment => &mut self.equipment,
            ResourceKind::Classes => &mut self.classes,
            ResourceKind::Feats => &mut self.feats,
            ResourceKind::Traits => &mut self.traits,
            ResourceKind::Specials => &mut self.specials,
            ResourceKind::Skills => &mut self.skills,
            ResourceKind::Spells => &mut self.spells,
            ResourceKind::Armor => &mut self.armor,
            ResourceKind::Attacks => &mut self.attacks,
            ResourceKind::Abilities => &mut self.abilities,
            ResourceKind::SavingThrows => &mut self.saving_throws,
        }
    }

    pub fn query_records(&self, kind: ResourceKind, spec: &FilterSpec) -> Result<Vec<Value>, AggregateError> {
        self.collection(kind).query_json(spec)
    }

    pub fn get_record(&self, kind: ResourceKind, id: RecordId) -> Result<Value, AggregateError> {
        self.collection(kind).get_json(id)
    }

    pub fn add_record(&mut self, kind: ResourceKind, fields: &Map<String, Value>) -> Result<Value, AggregateError> {
        self.collection_mut(kind).add_json(fields)
    }

    pub fn patch_record(
        &mut self,
        kind: ResourceKind,
        id: RecordId,
        partial: &Map<String, Value>,
    ) -> Result<Value, AggregateError> {
        self.collection_mut(kind).patch_json(id, partial)
    }

    pub fn delete_record(&mut self, kind: ResourceKind, id: RecordId) -> Result<Value, AggregateError> {
        self.collection_mut(kind).delete_json(id)
    }

    pub fn delete_matching(&mut self, kind: ResourceKind, spec: &FilterSpec) -> Result<Value, AggregateError> {
        self.collection_mut(kind).delete_matching_json(spec)
    }
}

fn parse_typed<T: DeserializeOwned>(attribute: Attribute, value: Value) -> Result<T, AggregateError> {
    serde_json::from_value(value).map_err(|e| AggregateError::validation(attribute.as_str(), e.to_string()))
}

fn check_length(attribute: Attribute, text: &str, limit: usize) -> Result<(), AggregateError> {
    if text.len() > limit {
        return Err(AggregateError::validation(
            attribute.as_str(),
            format!("cannot exceed {} characters", limit),
        ));
    }
    Ok(())
}

fn parse_text(attribute: Attribute, value: Value) -> Result<String, AggregateError> {
    let text: String = parse_typed(attribute, value)?;
    check_length(attribute, &text, MAX_TEXT_LENGTH)?;
    Ok(text)
}

fn parse_name(attribute: Attribute, value: Value) -> Result<String, AggregateError> {
    let name: String = parse_typed(attribute, value)?;
    if name.trim().is_empty() {
        return Err(AggregateError::validation(attribute.as_str(), "cannot be empty"));
    }
    check_length(attribute, &name, MAX_NAME_LENGTH)?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{MatchMode, NumericRange};
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn samuel() -> CharacterSheet {
        let mut sheet = CharacterSheet::blank();
        sheet.set_attribute(Attribute::Name, json!("Samuel")).unwrap();
        sheet.set_attribute(Attribute::Race, json!("Half-Elf")).unwrap();
        sheet.set_attribute(Attribute::Alignment, json!("CG")).unwrap();
        sheet
            .set_attribute(Attribute::Money, json!({"gold": 42, "silver": 3}))
            .unwrap();
        sheet
            .add_record(ResourceKind::Equipment, &fields(json!({"name": "Sword", "weight": 5})))
            .unwrap();
        sheet
            .add_record(ResourceKind::Equipment, &fields(json!({"name": "Shield", "weight": 10})))
            .unwrap();
        sheet
            .add_record(
                ResourceKind::Classes,
                &fields(json!({"name": "Magus", "level": 3, "archetypes": ["Bladebound"]})),
            )
            .unwrap();
        sheet
            .add_record(ResourceKind::Spells, &fields(json!({"name": "Shocking Grasp", "level": 1, "school": "evocation"})))
            .unwrap();
        sheet
    }

    #[test]
    fn test_default_is_fully_defined_and_empty() {
        let sheet = CharacterSheet::default();
        for kind in ResourceKind::ALL {
            assert_eq!(sheet.collection(kind).record_count(), 0, "{kind} should be empty");
        }
        for attribute in Attribute::ALL {
            assert!(sheet.get_attribute(attribute).is_ok());
        }
        assert_eq!(sheet.alignment, Alignment::Neutral);
    }

    #[test]
    fn test_blank_has_rule_defaults() {
        let sheet = CharacterSheet::blank();
        assert_eq!(sheet.abilities.len(), 6);
        assert_eq!(sheet.saving_throws.len(), 3);
        assert_eq!(sheet.skills.len(), 35);
        assert!(sheet.equipment.is_empty());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut sheet = samuel();
        let sword = sheet.equipment.records()[0].uuid;
        sheet
            .patch_record(ResourceKind::Equipment, sword, &fields(json!({"notes": "+1"})))
            .unwrap();
        let shield = sheet.equipment.records()[1].uuid;
        sheet.delete_record(ResourceKind::Equipment, shield).unwrap();

        let snapshot = sheet.snapshot().unwrap();
        let restored = CharacterSheet::restore(snapshot.clone()).unwrap();

        assert_eq!(restored, sheet);
        assert_eq!(restored.snapshot().unwrap(), snapshot);
        assert_eq!(restored.equipment.records()[0].uuid, sword);
    }

    #[test]
    fn test_restore_rejects_bad_documents() {
        assert!(matches!(
            CharacterSheet::restore(json!([1, 2])),
            Err(AggregateError::MalformedInput(_))
        ));
        assert!(CharacterSheet::restore(json!({"alignment": "Good"})).is_err());
        assert!(CharacterSheet::restore(json!({"equipment": [{"weight": 1}]})).is_err());

        let partial = CharacterSheet::restore(json!({"name": "Ezren"})).unwrap();
        assert_eq!(partial.name, "Ezren");
        assert!(partial.skills.is_empty());
    }

    #[test]
    fn test_set_attribute_validates_shape() {
        let mut sheet = samuel();
        let before = sheet.clone();

        assert!(sheet.set_attribute(Attribute::Age, json!("old")).is_err());
        assert!(sheet.set_attribute(Attribute::Age, json!(-4)).is_err());
        assert!(sheet.set_attribute(Attribute::Alignment, json!("Good")).is_err());
        assert!(sheet.set_attribute(Attribute::Name, json!("  ")).is_err());
        assert!(sheet.set_attribute(Attribute::Money, json!({"gems": 3})).is_err());
        assert!(sheet.set_attribute(Attribute::Languages, json!("Common")).is_err());
        assert_eq!(sheet, before);

        sheet.set_attribute(Attribute::Languages, json!(["Common", "Elven"])).unwrap();
        assert_eq!(sheet.get_attribute(Attribute::Languages).unwrap(), json!(["Common", "Elven"]));
    }

    #[test]
    fn test_setting_current_value_is_idempotent() {
        for mut sheet in [samuel(), CharacterSheet::blank(), CharacterSheet::default()] {
            let before = sheet.snapshot().unwrap();
            for attribute in Attribute::ALL {
                let current = sheet.get_attribute(attribute).unwrap();
                sheet.set_attribute(attribute, current).unwrap();
            }
            assert_eq!(sheet.snapshot().unwrap(), before);
        }

        // Clearing the name is still refused once one is set
        let mut sheet = samuel();
        assert!(sheet.set_attribute(Attribute::Name, json!("")).is_err());
    }

    #[test]
    fn test_restore_applies_length_limits() {
        let long_name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(
            CharacterSheet::restore(json!({"name": long_name})),
            Err(AggregateError::Validation { .. })
        ));
        let long_text = "x".repeat(MAX_TEXT_LENGTH + 1);
        assert!(CharacterSheet::restore(json!({"description": long_text})).is_err());

        // Anything restore accepts can be written back through set_attribute
        let edge = CharacterSheet::restore(json!({
            "name": "x".repeat(MAX_NAME_LENGTH),
            "hair": "y".repeat(MAX_TEXT_LENGTH),
        }))
        .unwrap();
        let mut copy = CharacterSheet::default();
        for attribute in Attribute::ALL {
            copy.set_attribute(attribute, edge.get_attribute(attribute).unwrap()).unwrap();
        }
        assert_eq!(copy.name, edge.name);
        assert_eq!(copy.hair, edge.hair);
    }

    #[test]
    fn test_snapshot_text_round_trip_keeps_float_weights() {
        let mut sheet = CharacterSheet::default();
        for weight in [0.1 + 0.2, 0.2274, 1.0 / 3.0, 2.675] {
            sheet
                .add_record(ResourceKind::Equipment, &fields(json!({"name": "Vial", "weight": weight})))
                .unwrap();
        }
        let text = serde_json::to_string(&sheet.snapshot().unwrap()).unwrap();
        let restored = CharacterSheet::restore(serde_json::from_str(&text).unwrap()).unwrap();
        assert_eq!(restored, sheet);
        assert_eq!(restored.equipment.records()[0].weight, 0.1 + 0.2);
    }

    #[test]
    fn test_dispatch_by_kind() {
        let mut sheet = samuel();
        let spec = FilterSpec::new().range("weight", NumericRange::at_least(6.0));
        let heavy = sheet.query_records(ResourceKind::Equipment, &spec).unwrap();
        assert_eq!(heavy.len(), 1);
        assert_eq!(heavy[0]["name"], json!("Shield"));

        let spec = FilterSpec::new().list("archetypes", ["Bladebound"]);
        assert_eq!(sheet.query_records(ResourceKind::Classes, &spec).unwrap().len(), 1);

        let spec = FilterSpec::new().text("name", ["dex"], MatchMode::Absolute);
        let dex = sheet.query_records(ResourceKind::Abilities, &spec).unwrap();
        let id = RecordId::parse(dex[0]["uuid"].as_str().unwrap()).unwrap();
        let patched = sheet
            .patch_record(ResourceKind::Abilities, id, &fields(json!({"score": {"base": 16}})))
            .unwrap();
        assert_eq!(patched["score"], json!({"base": 16, "misc": 0}));

        let strong = FilterSpec::new().range("score", NumericRange::at_least(15.0));
        assert_eq!(sheet.query_records(ResourceKind::Abilities, &strong).unwrap().len(), 1);
    }
}
