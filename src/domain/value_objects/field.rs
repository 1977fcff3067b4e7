//! Field schemas and field values shared by every record kind
//!
//! Each record kind declares its fields as a static slice of [`FieldSpec`].
//! The schema drives three things: coercion and validation of loosely-typed
//! JSON input, parsing of query parameters into typed filters, and the
//! lookup of field values when a filter is evaluated.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::domain::aggregates::AggregateError;

/// Name of the identity field present on every record
pub const UUID_FIELD: &str = "uuid";

/// The shape of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Short or enumerated text
    Text,
    /// List of text values
    List,
    /// Real number
    Number,
    /// Whole number
    Integer,
    Bool,
    /// Nested `{ base, misc }` breakdown
    Modifier,
}

impl FieldType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::List => "list",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Bool => "boolean",
            Self::Modifier => "modifier",
        }
    }
}

/// Declaration of one field of a record kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    /// Text must be non-empty
    pub required: bool,
    /// Closed set of values for text fields and list elements
    pub allowed: Option<&'static [&'static str]>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl FieldSpec {
    const fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: false,
            allowed: None,
            min: None,
            max: None,
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, FieldType::Text)
    }

    pub const fn list(name: &'static str) -> Self {
        Self::new(name, FieldType::List)
    }

    pub const fn number(name: &'static str) -> Self {
        Self::new(name, FieldType::Number)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, FieldType::Integer)
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldType::Bool)
    }

    pub const fn modifier(name: &'static str) -> Self {
        Self::new(name, FieldType::Modifier)
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn one_of(self, allowed: &'static [&'static str]) -> Self {
        Self {
            allowed: Some(allowed),
            ..self
        }
    }

    pub const fn at_least(self, min: f64) -> Self {
        Self {
            min: Some(min),
            ..self
        }
    }

    pub const fn at_most(self, max: f64) -> Self {
        Self {
            max: Some(max),
            ..self
        }
    }

    pub const fn between(self, min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..self
        }
    }

    /// Coerce a loosely-typed JSON value into this field's canonical shape
    ///
    /// Numeric and boolean fields also accept their textual forms (`"5"`,
    /// `"true"`), and a list field accepts a single string as a one-element
    /// list. The returned value is what gets stored.
    pub fn coerce(&self, value: Value) -> Result<Value, AggregateError> {
        if value.is_null() {
            return Err(self.invalid("must not be null"));
        }

        match self.field_type {
            FieldType::Text => {
                let text = match value {
                    Value::String(s) => s,
                    _ => return Err(self.invalid("must be text")),
                };
                if self.required && text.trim().is_empty() {
                    return Err(self.invalid("is required"));
                }
                self.check_allowed(&text)?;
                Ok(Value::String(text))
            }
            FieldType::List => {
                let items = match value {
                    Value::String(s) => vec![s],
                    Value::Array(values) => values
                        .into_iter()
                        .map(|v| match v {
                            Value::String(s) => Ok(s),
                            _ => Err(self.invalid("must be a list of text")),
                        })
                        .collect::<Result<Vec<_>, _>>()?,
                    _ => return Err(self.invalid("must be a list of text")),
                };
                for item in &items {
                    self.check_allowed(item)?;
                }
                Ok(Value::Array(items.into_iter().map(Value::String).collect()))
            }
            FieldType::Number => {
                let number = match &value {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                }
                .filter(|n| n.is_finite())
                .ok_or_else(|| self.invalid("must be a number"))?;
                self.check_bounds(number)?;
                Number::from_f64(number)
                    .map(Value::Number)
                    .ok_or_else(|| self.invalid("must be a number"))
            }
            FieldType::Integer => {
                let integer = match &value {
                    Value::Number(n) => n.as_i64().or_else(|| {
                        n.as_f64()
                            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                            .map(|f| f as i64)
                    }),
                    Value::String(s) => s.trim().parse::<i64>().ok(),
                    _ => None,
                }
                .ok_or_else(|| self.invalid("must be a whole number"))?;
                self.check_bounds(integer as f64)?;
                Ok(Value::from(integer))
            }
            FieldType::Bool => match &value {
                Value::Bool(b) => Ok(Value::Bool(*b)),
                Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
                Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
                _ => Err(self.invalid("must be true or false")),
            },
            FieldType::Modifier => {
                let modifier: Modifier = serde_json::from_value(value)
                    .map_err(|_| self.invalid("must be an object of whole numbers {base, misc}"))?;
                serde_json::to_value(modifier)
                    .map_err(|e| AggregateError::Serialization(e.to_string()))
            }
        }
    }

    fn check_allowed(&self, value: &str) -> Result<(), AggregateError> {
        match self.allowed {
            Some(allowed) if !allowed.contains(&value) => Err(self.invalid(format!(
                "must be one of: {}",
                allowed.join(", ")
            ))),
            _ => Ok(()),
        }
    }

    fn check_bounds(&self, value: f64) -> Result<(), AggregateError> {
        if let Some(min) = self.min {
            if value < min {
                return Err(self.invalid(format!("must be at least {}", min)));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(self.invalid(format!("must be at most {}", max)));
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: impl Into<String>) -> AggregateError {
        AggregateError::validation(self.name, reason)
    }
}

/// Look up a field declaration by name
pub fn find_field(schema: &'static [FieldSpec], name: &str) -> Option<&'static FieldSpec> {
    schema.iter().find(|spec| spec.name == name)
}

/// A numeric bonus split into its base value and miscellaneous adjustments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Modifier {
    pub base: i64,
    pub misc: i64,
}

impl Modifier {
    pub fn new(base: i64, misc: i64) -> Self {
        Self { base, misc }
    }

    /// Sum of both components; widened so any pair of stored values fits
    pub fn total(&self) -> i128 {
        i128::from(self.base) + i128::from(self.misc)
    }
}

/// A borrowed view of one field of a record, used when evaluating filters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(&'a [String]),
    Number(f64),
    Bool(bool),
    Modifier(Modifier),
}
