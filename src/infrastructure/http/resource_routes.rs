//! Resource collection API routes - equipment, classes, feats, spells, ...

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::{session_key, ApiError};
use crate::application::dto::{parse_filter_params, ApiResponse};
use crate::application::services::CharacterSheetService;
use crate::domain::aggregates::AggregateError;
use crate::domain::entities::schema_for;
use crate::domain::value_objects::{FilterSpec, RecordId, ResourceKind};
use crate::infrastructure::state::AppState;

type QueryParams = Query<Vec<(String, String)>>;

fn filters(kind: ResourceKind, params: &[(String, String)]) -> Result<FilterSpec, ApiError> {
    Ok(parse_filter_params(schema_for(kind), params)?)
}

fn fields(payload: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, ApiError> {
    match payload? {
        Json(Value::Object(fields)) => Ok(fields),
        Json(_) => Err(AggregateError::MalformedInput("request body must be a JSON object".to_string()).into()),
    }
}

/// List records matching the query parameters
pub async fn list_records(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(kind): Path<String>,
    Query(params): QueryParams,
) -> Result<Json<ApiResponse>, ApiError> {
    let session = session_key(&headers, &state)?;
    let kind: ResourceKind = kind.parse()?;
    let spec = filters(kind, &params)?;

    let records = state.sheet_service.list_records(&session, kind, &spec).await?;
    Ok(Json(ApiResponse::success(
        format!("Found {} {} records", records.len(), kind),
        Value::Array(records),
    )))
}

/// Add a record
pub async fn add_record(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(kind): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse>), ApiError> {
    let session = session_key(&headers, &state)?;
    let kind: ResourceKind = kind.parse()?;
    let fields = fields(payload)?;

    let record = state.sheet_service.add_record(&session, kind, fields).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(format!("Added {} record", kind), record)),
    ))
}

/// Delete the one record matching the query parameters
pub async fn delete_matching(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(kind): Path<String>,
    Query(params): QueryParams,
) -> Result<Json<ApiResponse>, ApiError> {
    let session = session_key(&headers, &state)?;
    let kind: ResourceKind = kind.parse()?;
    let spec = filters(kind, &params)?;
    if spec.is_vacuous() {
        return Err(ApiError::bad_request(
            "Deleting by filter requires at least one constraining filter parameter",
        ));
    }

    let record = state.sheet_service.delete_matching(&session, kind, spec).await?;
    Ok(Json(ApiResponse::success(format!("Deleted {} record", kind), record)))
}

/// Get a record by identity
pub async fn get_record(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<ApiResponse>, ApiError> {
    let session = session_key(&headers, &state)?;
    let kind: ResourceKind = kind.parse()?;
    let id = RecordId::parse(&id)?;

    let record = state.sheet_service.get_record(&session, kind, id).await?;
    Ok(Json(ApiResponse::success(format!("Found {} record", kind), record)))
}

/// Update some fields of a record
pub async fn patch_record(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((kind, id)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let session = session_key(&headers, &state)?;
    let kind: ResourceKind = kind.parse()?;
    let id = RecordId::parse(&id)?;
    let partial = fields(payload)?;

    let record = state
        .sheet_service
        .patch_record(&session, kind, id, partial)
        .await?;
    Ok(Json(ApiResponse::success(format!("Updated {} record", kind), record)))
}

/// Delete a record by identity
pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<ApiResponse>, ApiError> {
    let session = session_key(&headers, &state)?;
    let kind: ResourceKind = kind.parse()?;
    let id = RecordId::parse(&id)?;

    let record = state.sheet_service.delete_record(&session, kind, id).await?;
    Ok(Json(ApiResponse::success(format!("Deleted {} record", kind), record)))
}
