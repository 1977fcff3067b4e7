//! Record query evaluator - Selects records satisfying every filter

use tracing::debug;

use super::field_matches;
use crate::domain::entities::Record;
use crate::domain::value_objects::{FieldFilter, FilterSpec};

/// True when every filter in `spec` accepts the record
///
/// Filters on fields the record kind does not declare have no effect.
pub fn record_matches<R: Record>(record: &R, spec: &FilterSpec) -> bool {
    spec.iter().all(|(field, filter)| match filter {
        FieldFilter::Identity(ids) => ids.is_empty() || ids.contains(&record.id()),
        _ => match record.field(field) {
            Some(value) => field_matches(&value, filter),
            None => {
                let kind = R::KIND;
                debug!(kind = %kind, field, "Ignoring filter on undeclared field");
                true
            }
        },
    })
}

/// Matching records in insertion order
pub fn select<'a, R: Record>(records: &'a [R], spec: &FilterSpec) -> Vec<&'a R> {
    records
        .iter()
        .filter(|record| record_matches(*record, spec))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Equipment, Skill};
    use crate::domain::value_objects::{MatchMode, NumericRange};

    fn pack() -> Vec<Equipment> {
        vec![
            Equipment::new("Sword").with_weight(5.0),
            Equipment::new("Shield").with_weight(10.0),
            Equipment::new("Bedroll").with_weight(5.0).at_camp(),
        ]
    }

    fn names(records: &[&Equipment]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_empty_spec_returns_everything_in_order() {
        let items = pack();
        assert_eq!(
            names(&select(&items, &FilterSpec::new())),
            vec!["Sword", "Shield", "Bedroll"]
        );
    }

    #[test]
    fn test_filters_are_and_combined() {
        let items = pack();
        let spec = FilterSpec::new()
            .range("weight", NumericRange::exactly(5.0))
            .flag("camp", false);
        assert_eq!(names(&select(&items, &spec)), vec!["Sword"]);

        let spec = FilterSpec::new()
            .text("name", ["s"], MatchMode::Partial)
            .range("weight", NumericRange::at_least(6.0));
        assert_eq!(names(&select(&items, &spec)), vec!["Shield"]);
    }

    #[test]
    fn test_identity_filter() {
        let items = pack();
        let spec = FilterSpec::new().identity([items[2].uuid, items[0].uuid]);
        assert_eq!(names(&select(&items, &spec)), vec!["Sword", "Bedroll"]);

        let spec = FilterSpec::new().identity([]);
        assert_eq!(select(&items, &spec).len(), 3);
    }

    #[test]
    fn test_undeclared_field_is_ignored() {
        let skills = vec![Skill::new("Climb", "str", true)];
        let spec = FilterSpec::new().range("weight", NumericRange::at_least(100.0));
        assert_eq!(select(&skills, &spec).len(), 1);
    }
}
