//! Errors raised by aggregate operations
//!
//! Every variant is per-operation and recoverable: the aggregate is left
//! exactly as it was before the failing call.

use thiserror::Error;

use crate::domain::value_objects::ResourceKind;

/// Errors that can occur when reading or modifying the aggregate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregateError {
    /// A supplied value failed a type, shape or domain constraint
    #[error("Validation error: '{field}' {reason}")]
    Validation { field: String, reason: String },

    /// No record carries the requested identity, or nothing matched
    #[error("Not found: no {kind} record {target}")]
    NotFound { kind: ResourceKind, target: String },

    /// A delete-by-filter matched more than one record
    #[error("Ambiguous match: {count} {kind} records match, expected exactly one")]
    AmbiguousMatch { kind: ResourceKind, count: usize },

    /// Input could not be parsed into the expected shape
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Unknown resource collection: {0}")]
    UnknownResource(String),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AggregateError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(kind: ResourceKind, target: impl std::fmt::Display) -> Self {
        Self::NotFound {
            kind,
            target: target.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = AggregateError::validation("weight", "must be a number");
        assert_eq!(err.to_string(), "Validation error: 'weight' must be a number");

        let err = AggregateError::not_found(ResourceKind::Spells, "with uuid 1234");
        assert_eq!(err.to_string(), "Not found: no spells record with uuid 1234");
    }
}
