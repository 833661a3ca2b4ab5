use axum::{
    Json,
    http::StatusCode as HttpStatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Standard API response wrapper
///
/// Every error the dispatcher produces is rendered through this type, and
/// handlers may return it too so that successes and failures share a shape.
///
/// # Example
/// ```
/// use formroute::common::{ApiResponse, StatusCode};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Receipt {
///     stored: usize,
/// }
///
/// let ok = ApiResponse::created(Receipt { stored: 2 });
/// assert!(ok.success);
///
/// let err: ApiResponse<Receipt> = ApiResponse::error(StatusCode::BadRequest, "no file");
/// assert_eq!(err.error.unwrap().code, "BadRequest");
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    pub success: bool,

    pub timestamp: String,

    #[serde(skip)]
    pub http_status: HttpStatusCode,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response with data
    ///
    /// Defaults to HTTP 200 OK.
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            success: true,
            timestamp: chrono::Utc::now().to_rfc3339(),
            http_status: HttpStatusCode::OK,
        }
    }

    /// Successful response answered with HTTP 201.
    pub fn created(data: T) -> Self {
        Self {
            http_status: HttpStatusCode::CREATED,
            ..Self::success(data)
        }
    }

    /// Create an error response
    ///
    /// The error `code` is the `StatusCode` variant name.
    pub fn error(status: crate::common::StatusCode, message: impl Into<String>) -> ApiResponse<T> {
        ApiResponse {
            data: None,
            error: Some(ApiError {
                code: status.to_string(),
                message: message.into(),
            }),
            success: false,
            timestamp: chrono::Utc::now().to_rfc3339(),
            http_status: status.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.http_status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::StatusCode;

    #[test]
    fn test_error_body_shape() {
        let response: ApiResponse<()> = ApiResponse::error(StatusCode::NotFound, "missing");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "NotFound");
        assert_eq!(value["error"]["message"], "missing");
        assert!(value.get("data").is_none());
        assert!(value.get("http_status").is_none());
    }

    #[test]
    fn test_created_sets_status() {
        let response = ApiResponse::created(1u32).into_response();
        assert_eq!(response.status(), HttpStatusCode::CREATED);
    }
}
