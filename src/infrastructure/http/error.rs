//! Error responses in the shared envelope

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::dto::ApiResponse;
use crate::application::services::SheetServiceError;
use crate::domain::aggregates::AggregateError;

/// A failed request: status code plus the message sent to the client
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<AggregateError> for ApiError {
    fn from(error: AggregateError) -> Self {
        let status = match &error {
            AggregateError::Validation { .. } | AggregateError::MalformedInput(_) => {
                StatusCode::BAD_REQUEST
            }
            AggregateError::NotFound { .. }
            | AggregateError::UnknownResource(_)
            | AggregateError::UnknownAttribute(_) => StatusCode::NOT_FOUND,
            AggregateError::AmbiguousMatch { .. } => StatusCode::CONFLICT,
            AggregateError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, error.to_string())
    }
}

impl From<SheetServiceError> for ApiError {
    fn from(error: SheetServiceError) -> Self {
        match error {
            SheetServiceError::Domain(error) => error.into(),
            SheetServiceError::Store(error) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "{}", self.message);
        } else {
            tracing::debug!(status = %self.status, "{}", self.message);
        }
        (self.status, Json(ApiResponse::error(self.message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::StoreError;
    use crate::domain::value_objects::ResourceKind;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AggregateError::validation("name", "cannot be empty"), StatusCode::BAD_REQUEST),
            (AggregateError::MalformedInput("x".into()), StatusCode::BAD_REQUEST),
            (AggregateError::not_found(ResourceKind::Feats, "x"), StatusCode::NOT_FOUND),
            (AggregateError::UnknownResource("wands".into()), StatusCode::NOT_FOUND),
            (
                AggregateError::AmbiguousMatch {
                    kind: ResourceKind::Feats,
                    count: 2,
                },
                StatusCode::CONFLICT,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status(), status);
        }

        let error = SheetServiceError::Store(StoreError::Database("locked".into()));
        assert_eq!(ApiError::from(error).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
