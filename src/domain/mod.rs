//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Value Objects: identities, field declarations, filters, rule constants
//! - Entities: the record kinds a character sheet collects
//! - Services: pure field matching and record selection
//! - Aggregates: the character sheet root and its resource collections

pub mod aggregates;
pub mod entities;
pub mod services;
pub mod value_objects;
