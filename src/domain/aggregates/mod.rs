//! Aggregates - Cluster of domain objects treated as a single unit

mod character_sheet;
mod error;
mod resource_collection;

pub use character_sheet::CharacterSheet;
pub use error::AggregateError;
pub use resource_collection::{DynCollection, ResourceCollection};
