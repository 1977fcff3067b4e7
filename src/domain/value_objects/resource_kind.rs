//! The named collections a character sheet is made of

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::aggregates::AggregateError;

/// Kind of record held by a resource collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Equipment,
    Classes,
    Feats,
    Traits,
    Specials,
    Skills,
    Spells,
    Armor,
    Attacks,
    Abilities,
    SavingThrows,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 11] = [
        Self::Equipment,
        Self::Classes,
        Self::Feats,
        Self::Traits,
        Self::Specials,
        Self::Skills,
        Self::Spells,
        Self::Armor,
        Self::Attacks,
        Self::Abilities,
        Self::SavingThrows,
    ];

    /// Wire name, also the snapshot key of the collection
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equipment => "equipment",
            Self::Classes => "classes",
            Self::Feats => "feats",
            Self::Traits => "traits",
            Self::Specials => "specials",
            Self::Skills => "skills",
            Self::Spells => "spells",
            Self::Armor => "armor",
            Self::Attacks => "attacks",
            Self::Abilities => "abilities",
            Self::SavingThrows => "saving_throws",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AggregateError::UnknownResource(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.as_str().parse::<ResourceKind>().ok(), Some(kind));
            assert_eq!(
                serde_json::to_value(kind).ok(),
                Some(serde_json::Value::String(kind.as_str().to_string()))
            );
        }
        assert!("weapons".parse::<ResourceKind>().is_err());
    }
}
