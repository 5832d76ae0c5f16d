//! API error taxonomy and response mapping.
//!
//! Every failure a request can hit maps onto one of these variants, and
//! every variant renders as the wire shape `{ "error": "<message>" }` with
//! its HTTP status code. Nothing is retried; nothing escalates beyond the
//! response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the status-update endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request used a method other than POST.
    #[error("Only POST allowed")]
    MethodNotAllowed,

    /// Request body was not valid JSON.
    #[error("invalid JSON body: {0}")]
    InvalidBody(String),

    /// Required fields missing or empty after alias resolution.
    #[error("missing required field(s): {0}")]
    MissingFields(String),

    /// The store reported a failure while writing the record.
    #[error("failed to update status: {0}")]
    Persistence(String),

    /// Any other failure caught at the handler boundary.
    #[error("unexpected server error")]
    Unexpected,
}

impl ApiError {
    /// HTTP status code for this error.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidBody(_) | Self::MissingFields(_) => StatusCode::BAD_REQUEST,
            Self::Persistence(_) | Self::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(ApiError::MethodNotAllowed.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            ApiError::InvalidBody("truncated".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::MissingFields("subject".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Persistence("connection refused".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::Unexpected.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_fields_message_names_the_fields() {
        let error = ApiError::MissingFields("subject, status".to_string());
        assert_eq!(error.to_string(), "missing required field(s): subject, status");
    }

    #[test]
    fn method_not_allowed_message_is_exact() {
        assert_eq!(ApiError::MethodNotAllowed.to_string(), "Only POST allowed");
    }
}
