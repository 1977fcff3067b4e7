//! Value objects - Immutable objects defined by their attributes

mod attribute;
mod field;
mod filter;
mod ids;
mod resource_kind;
mod rule_system;

pub use attribute::{Attribute, HitPoints, Money};
pub use field::{find_field, FieldSpec, FieldType, FieldValue, Modifier, UUID_FIELD};
pub use filter::{FieldFilter, FilterSpec, MatchMode, NumericRange, TriState};
pub use ids::*;
pub use resource_kind::ResourceKind;
pub use rule_system::{
    Alignment, Size, ABILITY_CODES, ARMOR_TYPES, ATTACK_TYPES, CORE_SKILLS,
    DEFAULT_ABILITY_SCORE, SAVE_CODES, SAVING_THROWS, SPELL_SCHOOLS,
};
