use axum::http::StatusCode as HttpStatusCode;
use strum_macros::{Display, EnumString};

/// Status codes the dispatcher can answer with.
///
/// The variant name doubles as the machine-readable `code` field of an
/// error [`ApiResponse`](crate::common::ApiResponse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum StatusCode {
    Ok,
    Created,
    Accepted,
    BadRequest,
    NotFound,
    MethodNotAllowed,
    PayloadTooLarge,
    UnsupportedMediaType,
    UnprocessableEntity,
    InternalServerError,
}

impl From<StatusCode> for HttpStatusCode {
    fn from(status: StatusCode) -> Self {
        match status {
            StatusCode::Ok => HttpStatusCode::OK,
            StatusCode::Created => HttpStatusCode::CREATED,
            StatusCode::Accepted => HttpStatusCode::ACCEPTED,
            StatusCode::BadRequest => HttpStatusCode::BAD_REQUEST,
            StatusCode::NotFound => HttpStatusCode::NOT_FOUND,
            StatusCode::MethodNotAllowed => HttpStatusCode::METHOD_NOT_ALLOWED,
            StatusCode::PayloadTooLarge => HttpStatusCode::PAYLOAD_TOO_LARGE,
            StatusCode::UnsupportedMediaType => HttpStatusCode::UNSUPPORTED_MEDIA_TYPE,
            StatusCode::UnprocessableEntity => HttpStatusCode::UNPROCESSABLE_ENTITY,
            StatusCode::InternalServerError => HttpStatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
