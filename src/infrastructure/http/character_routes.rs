//! Character sheet API routes - the whole sheet and its scalar attributes

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::HeaderMap,
    Json,
};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::{session_key, ApiError};
use crate::application::dto::ApiResponse;
use crate::application::services::CharacterSheetService;
use crate::domain::aggregates::AggregateError;
use crate::domain::value_objects::Attribute;
use crate::infrastructure::state::AppState;

/// Get the full character snapshot
pub async fn get_character(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse>, ApiError> {
    let session = session_key(&headers, &state)?;
    let sheet = state.sheet_service.get_sheet(&session).await?;
    Ok(Json(ApiResponse::success("Character loaded", sheet)))
}

/// Replace the character with a supplied snapshot
pub async fn replace_character(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let session = session_key(&headers, &state)?;
    let Json(document) = payload?;
    let sheet = state.sheet_service.replace_sheet(&session, document).await?;
    Ok(Json(ApiResponse::success("Character replaced", sheet)))
}

/// Start the character over
pub async fn reset_character(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse>, ApiError> {
    let session = session_key(&headers, &state)?;
    let sheet = state.sheet_service.reset_sheet(&session).await?;
    Ok(Json(ApiResponse::success("Character reset", sheet)))
}

/// Get one scalar attribute as `{attribute: value}`
pub async fn get_attribute(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(attribute): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let session = session_key(&headers, &state)?;
    let attribute: Attribute = attribute.parse()?;
    let value = state.sheet_service.get_attribute(&session, attribute).await?;
    Ok(Json(ApiResponse::success(
        format!("Got {}", attribute),
        keyed(attribute, value),
    )))
}

/// Set one scalar attribute; the body must carry the attribute's own key
pub async fn set_attribute(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(attribute): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let session = session_key(&headers, &state)?;
    let attribute: Attribute = attribute.parse()?;
    let Json(body) = payload?;

    let value = match body {
        Value::Object(mut fields) => fields.remove(attribute.as_str()),
        _ => None,
    }
    .ok_or_else(|| {
        AggregateError::validation(attribute.as_str(), "must be supplied as a key of the request body")
    })?;

    let value = state
        .sheet_service
        .set_attribute(&session, attribute, value)
        .await?;
    Ok(Json(ApiResponse::success(
        format!("Updated {}", attribute),
        keyed(attribute, value),
    )))
}

fn keyed(attribute: Attribute, value: Value) -> Value {
    let mut data = Map::new();
    data.insert(attribute.as_str().to_string(), value);
    Value::Object(data)
}
