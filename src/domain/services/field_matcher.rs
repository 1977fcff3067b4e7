//! Field matcher - Decides whether one field value satisfies one filter

use crate::domain::value_objects::{FieldFilter, FieldValue, MatchMode};

/// Evaluate `filter` against a single field value
///
/// Identity filters are not field filters and never match here; the query
/// evaluator checks them against the record identity instead. A filter whose
/// type does not fit the field (a range on a text field, say) never matches.
pub fn field_matches(value: &FieldValue<'_>, filter: &FieldFilter) -> bool {
    match (filter, value) {
        (FieldFilter::Text { candidates, mode }, FieldValue::Text(text)) => {
            text_matches(text, candidates, *mode)
        }
        (FieldFilter::List(candidates), FieldValue::List(items)) => {
            candidates.is_empty() || items.iter().any(|item| candidates.contains(item))
        }
        (FieldFilter::Range(range), FieldValue::Number(number)) => range.contains(*number),
        (FieldFilter::Range(range), FieldValue::Modifier(modifier)) => {
            range.contains(modifier.total() as f64)
        }
        (FieldFilter::Bool(state), FieldValue::Bool(flag)) => state.admits(*flag),
        _ => false,
    }
}

fn text_matches(text: &str, candidates: &[String], mode: MatchMode) -> bool {
    if candidates.is_empty() {
        return true;
    }
    match mode {
        MatchMode::Absolute => candidates.iter().any(|candidate| candidate == text),
        MatchMode::Partial => {
            let haystack = text.to_lowercase();
            candidates
                .iter()
                .any(|candidate| haystack.contains(&candidate.to_lowercase()))
        }
    }
}
