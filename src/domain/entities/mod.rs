//! Domain entities - Records with identity that live in a character sheet

mod ability;
mod armor;
mod attack;
mod character_class;
mod equipment;
mod feature;
mod record;
mod skill;
mod spell;

pub use ability::{default_abilities, default_saving_throws, Ability, SavingThrow};
pub use armor::Armor;
pub use attack::Attack;
pub use character_class::CharacterClass;
pub use equipment::Equipment;
pub use feature::{Feat, Special, Trait};
pub use record::{
    build_record, merge_record, record_to_json, validate_record, Record,
};
pub use skill::{core_skills, Skill};
pub use spell::Spell;

use crate::domain::value_objects::{FieldSpec, ResourceKind};

/// Field declarations of a record kind
pub fn schema_for(kind: ResourceKind) -> &'static [FieldSpec] {
    match kind {
        ResourceKind::Equipment => Equipment::schema(),
        ResourceKind::Classes => CharacterClass::schema(),
        ResourceKind::Feats => Feat::schema(),
        ResourceKind::Traits => Trait::schema(),
        ResourceKind::Specials => Special::schema(),
        ResourceKind::Skills => Skill::schema(),
        ResourceKind::Spells => Spell::schema(),
        ResourceKind::Armor => Armor::schema(),
        ResourceKind::Attacks => Attack::schema(),
        ResourceKind::Abilities => Ability::schema(),
        ResourceKind::SavingThrows => SavingThrow::schema(),
    }
}
