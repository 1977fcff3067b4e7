//! Pathfinder rule tables
//!
//! Enumerations used to validate sheet content, and the default content a
//! blank sheet starts with.

use serde::{Deserialize, Serialize};

/// Ability score codes, in sheet order
pub const ABILITY_CODES: &[&str] = &["str", "dex", "con", "int", "wis", "cha"];

/// Saving throw codes with their governing ability
pub const SAVING_THROWS: &[(&str, &str)] =
    &[("fortitude", "con"), ("reflex", "dex"), ("will", "wis")];

pub const SAVE_CODES: &[&str] = &["fortitude", "reflex", "will"];

pub const SPELL_SCHOOLS: &[&str] = &[
    "abjuration",
    "conjuration",
    "divination",
    "enchantment",
    "evocation",
    "illusion",
    "necromancy",
    "transmutation",
    "universal",
];

pub const ARMOR_TYPES: &[&str] = &["light", "medium", "heavy", "shield"];

pub const ATTACK_TYPES: &[&str] = &["melee", "ranged", "touch", "ranged_touch", "combat_maneuver"];

/// Default ability score for a blank sheet
pub const DEFAULT_ABILITY_SCORE: i64 = 10;

/// Core skills: name, governing ability, usable untrained
pub const CORE_SKILLS: &[(&str, &str, bool)] = &[
    ("Acrobatics", "dex", true),
    ("Appraise", "int", true),
    ("Bluff", "cha", true),
    ("Climb", "str", true),
    ("Craft", "int", true),
    ("Diplomacy", "cha", true),
    ("Disable Device", "dex", false),
    ("Disguise", "cha", true),
    ("Escape Artist", "dex", true),
    ("Fly", "dex", true),
    ("Handle Animal", "cha", false),
    ("Heal", "wis", true),
    ("Intimidate", "cha", true),
    ("Knowledge (arcana)", "int", false),
    ("Knowledge (dungeoneering)", "int", false),
    ("Knowledge (engineering)", "int", false),
    ("Knowledge (geography)", "int", false),
    ("Knowledge (history)", "int", false),
    ("Knowledge (local)", "int", false),
    ("Knowledge (nature)", "int", false),
    ("Knowledge (nobility)", "int", false),
    ("Knowledge (planes)", "int", false),
    ("Knowledge (religion)", "int", false),
    ("Linguistics", "int", false),
    ("Perception", "wis", true),
    ("Perform", "cha", true),
    ("Profession", "wis", false),
    ("Ride", "dex", true),
    ("Sense Motive", "wis", true),
    ("Sleight of Hand", "dex", false),
    ("Spellcraft", "int", false),
    ("Stealth", "dex", true),
    ("Survival", "wis", true),
    ("Swim", "str", true),
    ("Use Magic Device", "cha", false),
];

/// Character alignment, serialized as its two-letter code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    #[serde(rename = "LG")]
    LawfulGood,
    #[serde(rename = "NG")]
    NeutralGood,
    #[serde(rename = "CG")]
    ChaoticGood,
    #[serde(rename = "LN")]
    LawfulNeutral,
    #[default]
    #[serde(rename = "N")]
    Neutral,
    #[serde(rename = "CN")]
    ChaoticNeutral,
    #[serde(rename = "LE")]
    LawfulEvil,
    #[serde(rename = "NE")]
    NeutralEvil,
    #[serde(rename = "CE")]
    ChaoticEvil,
}

/// Creature size category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Fine,
    Diminutive,
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Huge,
    Gargantuan,
    Colossal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_codes() {
        assert_eq!(serde_json::to_value(Alignment::ChaoticGood).ok(), Some("CG".into()));
        assert_eq!(
            serde_json::from_value::<Alignment>("LE".into()).ok(),
            Some(Alignment::LawfulEvil)
        );
        assert!(serde_json::from_value::<Alignment>("Good".into()).is_err());
    }

    #[test]
    fn test_core_skill_abilities_are_known() {
        assert_eq!(CORE_SKILLS.len(), 35);
        for (_, ability, _) in CORE_SKILLS {
            assert!(ABILITY_CODES.contains(ability));
        }
        for (save, ability) in SAVING_THROWS {
            assert!(SAVE_CODES.contains(save));
            assert!(ABILITY_CODES.contains(ability));
        }
    }
}
