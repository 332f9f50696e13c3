use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::errors::{ErrorKind, TeamError, ValidationErrors};

/// Maps a failure kind to the HTTP status returned for it
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::StoreFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub fields: Option<BTreeMap<String, String>>,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            fields: None,
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 400 Bad Request error listing each invalid field
    pub fn validation(errors: &ValidationErrors) -> Self {
        Self {
            status: status_for(ErrorKind::ValidationFailed),
            message: "Validation failed".to_string(),
            fields: Some(errors.fields().clone()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.fields {
            Some(fields) => json!({
                "error": self.message,
                "fields": fields,
            }),
            None => json!({
                "error": self.message
            }),
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation(&errors)
    }
}

impl From<TeamError> for ApiError {
    fn from(error: TeamError) -> Self {
        let status = status_for(error.kind());
        match error {
            TeamError::Store(cause) => {
                tracing::error!(error = %cause, "Store failure");
                Self::new(status, "Internal server error")
            }
            not_found @ TeamError::NotFound(_) => Self::new(status, not_found.to_string()),
        }
    }
}
