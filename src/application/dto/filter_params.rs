//! Query parameters to typed filter specifications
//!
//! Raw `key=value` pairs are interpreted against the schema of the record
//! kind being queried. Keys may repeat; `mode` selects exact text matching.

use serde::Deserialize;

use crate::domain::aggregates::AggregateError;
use crate::domain::value_objects::{
    find_field, FieldFilter, FieldSpec, FieldType, FilterSpec, MatchMode, NumericRange, RecordId,
    TriState, UUID_FIELD,
};

/// Reserved key selecting absolute or partial text matching
pub const MODE_PARAM: &str = "mode";

/// Range payload as written in a query string
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RangeParam {
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
}

/// Build a filter specification for one record kind
///
/// Unknown keys are rejected so a typo never silently widens a query.
pub fn parse_filter_params(
    schema: &'static [FieldSpec],
    params: &[(String, String)],
) -> Result<FilterSpec, AggregateError> {
    let mode = params
        .iter()
        .rev()
        .find(|(key, _)| key == MODE_PARAM)
        .map(|(_, value)| MatchMode::parse(value))
        .unwrap_or_default();

    let mut grouped: Vec<(&str, Vec<&str>)> = Vec::new();
    for (key, value) in params.iter().filter(|(key, _)| key != MODE_PARAM) {
        match grouped.iter_mut().find(|(k, _)| *k == key.as_str()) {
            Some((_, values)) => values.push(value.as_str()),
            None => grouped.push((key.as_str(), vec![value.as_str()])),
        }
    }

    let mut spec = FilterSpec::new();
    for (key, values) in grouped {
        if key == UUID_FIELD {
            let ids = values
                .into_iter()
                .map(RecordId::parse)
                .collect::<Result<Vec<_>, _>>()?;
            spec.insert(key, FieldFilter::Identity(ids));
            continue;
        }

        let field = find_field(schema, key)
            .ok_or_else(|| AggregateError::validation(key, "is not a filterable field"))?;
        let filter = match field.field_type {
            FieldType::Text => FieldFilter::Text {
                candidates: owned(values),
                mode,
            },
            FieldType::List => FieldFilter::List(owned(values)),
            FieldType::Number | FieldType::Integer | FieldType::Modifier => {
                FieldFilter::Range(parse_range(key, single(key, values)?)?)
            }
            FieldType::Bool => FieldFilter::Bool(parse_flag(key, single(key, values)?)?),
        };
        spec.insert(key, filter);
    }
    Ok(spec)
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}

fn single<'a>(key: &str, values: Vec<&'a str>) -> Result<&'a str, AggregateError> {
    match values.as_slice() {
        [value] => Ok(*value),
        _ => Err(AggregateError::MalformedInput(format!(
            "'{}' may only be given once",
            key
        ))),
    }
}

/// `{"min": a, "max": b}` with either bound optional, or a bare number
fn parse_range(key: &str, raw: &str) -> Result<NumericRange, AggregateError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(NumericRange::default());
    }
    if let Ok(value) = raw.parse::<f64>() {
        if value.is_finite() {
            return Ok(NumericRange::exactly(value));
        }
    }

    let range: RangeParam = serde_json::from_str(&raw.replace('\'', "\"")).map_err(|e| {
        AggregateError::MalformedInput(format!("'{}' must be a number or a min/max object: {}", key, e))
    })?;
    Ok(NumericRange {
        min: range.min,
        max: range.max,
    })
}

fn parse_flag(key: &str, raw: &str) -> Result<TriState, AggregateError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(TriState::Unset),
        "true" => Ok(TriState::True),
        "false" => Ok(TriState::False),
        other => Err(AggregateError::MalformedInput(format!(
            "'{}' must be true or false, got '{}'",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Ability, Equipment, Record};

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_text_keys_repeat_and_take_mode() {
        let spec = parse_filter_params(
            Equipment::schema(),
            &params(&[("name", "sword"), ("name", "axe"), ("mode", "absolute")]),
        )
        .unwrap();
        assert_eq!(
            spec.get("name"),
            Some(&FieldFilter::Text {
                candidates: vec!["sword".into(), "axe".into()],
                mode: MatchMode::Absolute,
            })
        );
        assert_eq!(spec.len(), 1);
    }

    #[test]
    fn test_ranges() {
        let spec = parse_filter_params(
            Equipment::schema(),
            &params(&[("weight", "{'min': 6}"), ("count", "2")]),
        )
        .unwrap();
        assert_eq!(spec.get("weight"), Some(&FieldFilter::Range(NumericRange::at_least(6.0))));
        assert_eq!(spec.get("count"), Some(&FieldFilter::Range(NumericRange::exactly(2.0))));

        let spec = parse_filter_params(Ability::schema(), &params(&[("score", r#"{"max": 12}"#)])).unwrap();
        assert_eq!(spec.get("score"), Some(&FieldFilter::Range(NumericRange::at_most(12.0))));

        let err = parse_filter_params(Equipment::schema(), &params(&[("weight", "heavy")]));
        assert!(matches!(err, Err(AggregateError::MalformedInput(_))));
        let err = parse_filter_params(Equipment::schema(), &params(&[("weight", "{'low': 1}")]));
        assert!(matches!(err, Err(AggregateError::MalformedInput(_))));
    }

    #[test]
    fn test_flags() {
        let spec = parse_filter_params(
            Equipment::schema(),
            &params(&[("camp", "TRUE"), ("on_person", "")]),
        )
        .unwrap();
        assert_eq!(spec.get("camp"), Some(&FieldFilter::Bool(TriState::True)));
        assert_eq!(spec.get("on_person"), Some(&FieldFilter::Bool(TriState::Unset)));

        let err = parse_filter_params(Equipment::schema(), &params(&[("camp", "maybe")]));
        assert!(matches!(err, Err(AggregateError::MalformedInput(_))));
    }

    #[test]
    fn test_identity_and_unknown_keys() {
        let id = RecordId::new();
        let spec = parse_filter_params(Equipment::schema(), &params(&[("uuid", id.to_string().as_str())])).unwrap();
        assert_eq!(spec.get("uuid"), Some(&FieldFilter::Identity(vec![id])));

        let err = parse_filter_params(Equipment::schema(), &params(&[("uuid", "not-a-uuid")]));
        assert!(matches!(err, Err(AggregateError::MalformedInput(_))));

        let err = parse_filter_params(Equipment::schema(), &params(&[("colour", "red")]));
        assert!(matches!(err, Err(AggregateError::Validation { .. })));
    }
}
