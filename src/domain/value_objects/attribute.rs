//! Scalar attributes of a character sheet

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::aggregates::AggregateError;

/// Name of a scalar, individually readable and writable attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Name,
    Player,
    Race,
    Deity,
    Homeland,
    Alignment,
    Gender,
    Age,
    Size,
    Height,
    Weight,
    Hair,
    Eyes,
    Description,
    Languages,
    Experience,
    HitPoints,
    Speed,
    Money,
}

impl Attribute {
    pub const ALL: [Attribute; 19] = [
        Self::Name,
        Self::Player,
        Self::Race,
        Self::Deity,
        Self::Homeland,
        Self::Alignment,
        Self::Gender,
        Self::Age,
        Self::Size,
        Self::Height,
        Self::Weight,
        Self::Hair,
        Self::Eyes,
        Self::Description,
        Self::Languages,
        Self::Experience,
        Self::HitPoints,
        Self::Speed,
        Self::Money,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Player => "player",
            Self::Race => "race",
            Self::Deity => "deity",
            Self::Homeland => "homeland",
            Self::Alignment => "alignment",
            Self::Gender => "gender",
            Self::Age => "age",
            Self::Size => "size",
            Self::Height => "height",
            Self::Weight => "weight",
            Self::Hair => "hair",
            Self::Eyes => "eyes",
            Self::Description => "description",
            Self::Languages => "languages",
            Self::Experience => "experience",
            Self::HitPoints => "hit_points",
            Self::Speed => "speed",
            Self::Money => "money",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attribute| attribute.as_str() == s)
            .ok_or_else(|| AggregateError::UnknownAttribute(s.to_string()))
    }
}

/// Hit point track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HitPoints {
    pub max: u32,
    /// May drop below zero while dying
    pub current: i64,
    pub temporary: u32,
    pub nonlethal: u32,
}

/// Coins carried, by denomination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Money {
    pub copper: u64,
    pub silver: u64,
    pub gold: u64,
    pub platinum: u64,
}
