//! HTTP REST API routes

mod character_routes;
mod error;
mod resource_routes;

use axum::{
    http::HeaderMap,
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::domain::value_objects::SessionKey;
use crate::infrastructure::state::AppState;

pub use error::ApiError;

/// Header naming the session a request works on
pub const SESSION_HEADER: &str = "x-session-id";

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Whole sheet
        .route(
            "/api/character",
            get(character_routes::get_character)
                .put(character_routes::replace_character)
                .delete(character_routes::reset_character),
        )
        // Scalar attributes
        .route(
            "/api/character/attributes/{attribute}",
            get(character_routes::get_attribute).put(character_routes::set_attribute),
        )
        // Resource collections
        .route(
            "/api/character/{kind}",
            get(resource_routes::list_records)
                .post(resource_routes::add_record)
                .delete(resource_routes::delete_matching),
        )
        .route(
            "/api/character/{kind}/{id}",
            get(resource_routes::get_record)
                .patch(resource_routes::patch_record)
                .delete(resource_routes::delete_record),
        )
}

/// Session named by the request, or the configured default
fn session_key(headers: &HeaderMap, state: &AppState) -> Result<SessionKey, ApiError> {
    let key = match headers.get(SESSION_HEADER) {
        Some(value) => value
            .to_str()
            .map_err(|_| ApiError::bad_request("Session header must be ASCII"))?,
        None => state.config.default_session.as_str(),
    };
    Ok(SessionKey::new(key)?)
}
