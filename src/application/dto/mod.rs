//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so the HTTP adapter can turn raw
//! requests into typed domain input without the domain knowing about them.

mod api_response;
mod filter_params;

pub use api_response::{ApiResponse, ResponseStatus};
pub use filter_params::{parse_filter_params, MODE_PARAM};
