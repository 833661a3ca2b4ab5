pub mod response;
pub mod status_code;

pub use response::{ApiError, ApiResponse};
pub use status_code::StatusCode;
