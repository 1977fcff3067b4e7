//! Domain services - Pure filtering logic shared by every collection

mod field_matcher;
mod record_query;

pub use field_matcher::field_matches;
pub use record_query::{record_matches, select};
