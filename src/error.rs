use crate::common::{ApiResponse, StatusCode};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FormRouteError>;

#[derive(Debug, Error)]
pub enum FormRouteError {
    #[error("Route {path} is already handled by {existing}, cannot register {handler}")]
    DuplicateRoute {
        path: String,
        existing: String,
        handler: String,
    },

    #[error("Invalid route path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Unsupported content type: expected multipart/form-data, got {content_type}")]
    UnsupportedContentType { content_type: String },

    #[error("Malformed multipart body: {0}")]
    MalformedBody(String),

    #[error("Multipart body exceeds the configured limit: {0}")]
    PayloadTooLarge(String),

    #[error("Missing form part: {name}")]
    MissingPart { name: String },

    #[error("Invalid form part {name}: {reason}")]
    InvalidPart { name: String, reason: String },

    #[error("No multipart route for {path}")]
    RouteNotFound { path: String },

    #[error("Invalid configuration value for {key}: {value:?}")]
    InvalidConfig { key: String, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormRouteError {
    /// Errors raised while building the route table. These are fatal to
    /// startup; everything else is reported per request.
    pub fn is_registration_error(&self) -> bool {
        matches!(
            self,
            FormRouteError::DuplicateRoute { .. } | FormRouteError::InvalidPath { .. }
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            FormRouteError::UnsupportedContentType { .. } => StatusCode::UnsupportedMediaType,
            FormRouteError::MalformedBody(_)
            | FormRouteError::MissingPart { .. }
            | FormRouteError::InvalidPart { .. } => StatusCode::BadRequest,
            FormRouteError::PayloadTooLarge(_) => StatusCode::PayloadTooLarge,
            FormRouteError::RouteNotFound { .. } => StatusCode::NotFound,
            FormRouteError::DuplicateRoute { .. }
            | FormRouteError::InvalidPath { .. }
            | FormRouteError::InvalidConfig { .. }
            | FormRouteError::Io(_) => StatusCode::InternalServerError,
        }
    }
}

impl axum::response::IntoResponse for FormRouteError {
    fn into_response(self) -> axum::response::Response {
        ApiResponse::<()>::error(self.status_code(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_registration_errors_are_classified() {
        let duplicate = FormRouteError::DuplicateRoute {
            path: "/upload".into(),
            existing: "a".into(),
            handler: "b".into(),
        };
        assert!(duplicate.is_registration_error());
        assert!(!FormRouteError::MissingPart { name: "file".into() }.is_registration_error());
        assert!(!FormRouteError::RouteNotFound { path: "/x".into() }.is_registration_error());
    }

    #[test]
    fn test_request_errors_map_to_client_statuses() {
        let response = FormRouteError::UnsupportedContentType {
            content_type: "application/json".into(),
        }
        .into_response();
        assert_eq!(response.status(), axum::http::StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let response = FormRouteError::MissingPart { name: "file".into() }.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);

        let response = FormRouteError::RouteNotFound { path: "/nope".into() }.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
    }
}
