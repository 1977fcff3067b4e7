//! Feats, traits and special abilities
//!
//! All three are plain named descriptions, so they share one shape but stay
//! distinct types so a feat can never end up in the traits collection.

use serde::{Deserialize, Serialize};

use super::Record;
use crate::domain::value_objects::{FieldSpec, FieldValue, RecordId, ResourceKind};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name").required(),
    FieldSpec::text("description"),
    FieldSpec::text("notes"),
];

macro_rules! define_feature {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct $name {
            pub uuid: RecordId,
            pub name: String,
            pub description: String,
            pub notes: String,
        }

        impl $name {
            pub fn new(name: impl Into<String>) -> Self {
                Self {
                    name: name.into(),
                    ..Self::default()
                }
            }

            pub fn with_description(mut self, description: impl Into<String>) -> Self {
                self.description = description.into();
                self
            }
        }

        impl Record for $name {
            const KIND: ResourceKind = $kind;

            fn schema() -> &'static [FieldSpec] {
                FIELDS
            }

            fn id(&self) -> RecordId {
                self.uuid
            }

            fn field(&self, name: &str) -> Option<FieldValue<'_>> {
                Some(match name {
                    "name" => FieldValue::Text(&self.name),
                    "description" => FieldValue::Text(&self.description),
                    "notes" => FieldValue::Text(&self.notes),
                    _ => return None,
                })
            }
        }
    };
}

define_feature!(
    /// A feat taken at level-up or granted as a bonus
    Feat,
    ResourceKind::Feats
);

define_feature!(
    /// A character trait chosen at creation
    Trait,
    ResourceKind::Traits
);

define_feature!(
    /// A racial or class special ability
    Special,
    ResourceKind::Specials
);
