//! Typed filter specifications for record queries
//!
//! Raw query parameters are turned into these variants once, at the
//! boundary. The matcher only ever sees the typed form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{RecordId, UUID_FIELD};

/// How text candidates are compared against a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Exact, case-sensitive equality
    Absolute,
    /// Case-insensitive substring containment
    #[default]
    Partial,
}

impl MatchMode {
    /// Only the literal `absolute` selects exact matching
    pub fn parse(value: &str) -> Self {
        if value == "absolute" {
            Self::Absolute
        } else {
            Self::Partial
        }
    }
}

/// Inclusive numeric bounds; a missing bound is not checked
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn exactly(value: f64) -> Self {
        Self::between(value, value)
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| min <= value) && self.max.map_or(true, |max| value <= max)
    }
}

/// Boolean filter that can also be switched off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriState {
    #[default]
    Unset,
    True,
    False,
}

impl TriState {
    pub fn admits(self, value: bool) -> bool {
        match self {
            Self::Unset => true,
            Self::True => value,
            Self::False => !value,
        }
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Unset, Self::from)
    }
}

/// A constraint on one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFilter {
    Text {
        candidates: Vec<String>,
        mode: MatchMode,
    },
    /// Matches when the field's list shares an element with the candidates
    List(Vec<String>),
    Range(NumericRange),
    Bool(TriState),
    /// Record identity must be one of these
    Identity(Vec<RecordId>),
}

impl FieldFilter {
    /// True when the filter admits every value of its field
    ///
    /// A partial text candidate of `""` is a substring of anything, so one
    /// such candidate is enough.
    pub fn is_vacuous(&self) -> bool {
        match self {
            Self::Text { candidates, mode } => {
                candidates.is_empty()
                    || (*mode == MatchMode::Partial && candidates.iter().any(String::is_empty))
            }
            Self::List(candidates) => candidates.is_empty(),
            Self::Range(range) => range.is_unbounded(),
            Self::Bool(state) => *state == TriState::Unset,
            Self::Identity(ids) => ids.is_empty(),
        }
    }
}

/// Per-field constraints combined with logical AND
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    filters: BTreeMap<String, FieldFilter>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True when every record would match, including the empty spec
    pub fn is_vacuous(&self) -> bool {
        self.filters.values().all(FieldFilter::is_vacuous)
    }

    pub fn get(&self, field: &str) -> Option<&FieldFilter> {
        self.filters.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldFilter)> {
        self.filters.iter().map(|(field, filter)| (field.as_str(), filter))
    }

    /// Replace any existing filter for `field`
    pub fn insert(&mut self, field: impl Into<String>, filter: FieldFilter) {
        self.filters.insert(field.into(), filter);
    }

    pub fn with(mut self, field: impl Into<String>, filter: FieldFilter) -> Self {
        self.insert(field, filter);
        self
    }

    pub fn text<I, S>(self, field: impl Into<String>, candidates: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(
            field,
            FieldFilter::Text {
                candidates: candidates.into_iter().map(Into::into).collect(),
                mode,
            },
        )
    }

    pub fn list<I, S>(self, field: impl Into<String>, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(
            field,
            FieldFilter::List(candidates.into_iter().map(Into::into).collect()),
        )
    }

    pub fn range(self, field: impl Into<String>, range: NumericRange) -> Self {
        self.with(field, FieldFilter::Range(range))
    }

    pub fn flag(self, field: impl Into<String>, state: impl Into<TriState>) -> Self {
        self.with(field, FieldFilter::Bool(state.into()))
    }

    pub fn identity(self, ids: impl IntoIterator<Item = RecordId>) -> Self {
        self.with(UUID_FIELD, FieldFilter::Identity(ids.into_iter().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_range_bounds() {
        assert!(NumericRange::default().contains(-1000.0));
        assert!(NumericRange::at_least(6.0).contains(6.0));
        assert!(!NumericRange::at_least(6.0).contains(5.0));
        assert!(NumericRange::at_most(6.0).contains(6.0));
        assert!(!NumericRange::between(1.0, 3.0).contains(3.5));
        assert!(NumericRange::exactly(2.0).contains(2.0));
    }

    #[test]
    fn test_tri_state() {
        assert!(TriState::Unset.admits(true) && TriState::Unset.admits(false));
        assert!(TriState::True.admits(true) && !TriState::True.admits(false));
        assert!(TriState::False.admits(false) && !TriState::False.admits(true));
        assert_eq!(TriState::from(None), TriState::Unset);
    }

    #[test]
    fn test_match_mode_parse() {
        assert_eq!(MatchMode::parse("absolute"), MatchMode::Absolute);
        assert_eq!(MatchMode::parse("Absolute"), MatchMode::Partial);
        assert_eq!(MatchMode::parse(""), MatchMode::Partial);
    }

    #[test]
    fn test_vacuous_filters() {
        assert!(FilterSpec::new().is_vacuous());
        assert!(FilterSpec::new().text("camp", [""], MatchMode::Partial).is_vacuous());
        assert!(FilterSpec::new().text("notes", ["x", ""], MatchMode::Partial).is_vacuous());
        assert!(FilterSpec::new().range("weight", NumericRange::default()).is_vacuous());
        assert!(FilterSpec::new().flag("camp", None::<bool>).is_vacuous());
        assert!(FilterSpec::new().list("archetypes", Vec::<String>::new()).is_vacuous());
        assert!(FilterSpec::new().identity(Vec::<RecordId>::new()).is_vacuous());

        assert!(!FilterSpec::new().text("name", [""], MatchMode::Absolute).is_vacuous());
        assert!(!FilterSpec::new().flag("camp", false).is_vacuous());
        assert!(!FilterSpec::new().range("weight", NumericRange::at_most(0.0)).is_vacuous());
        let mixed = FilterSpec::new()
            .range("weight", NumericRange::default())
            .text("name", ["Rope"], MatchMode::Partial);
        assert!(!mixed.is_vacuous());
    }

    #[test]
    fn test_builder_replaces_existing_filter() {
        let spec = FilterSpec::new()
            .range("weight", NumericRange::at_least(1.0))
            .range("weight", NumericRange::at_most(3.0));
        assert_eq!(spec.len(), 1);
        assert_eq!(
            spec.get("weight"),
            Some(&FieldFilter::Range(NumericRange::at_most(3.0)))
        );
    }
}
