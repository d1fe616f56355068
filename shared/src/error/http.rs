//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::ProductNotFound => StatusCode::NOT_FOUND,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::InvalidPasscode => StatusCode::UNAUTHORIZED,

            // 502 Bad Gateway (hosted backend rejected the call)
            Self::BackendError | Self::OrderSubmitFailed => StatusCode::BAD_GATEWAY,

            // 503 Service Unavailable (degraded mode / transient errors)
            Self::BackendNotConfigured | Self::NetworkError | Self::TimeoutError => {
                StatusCode::SERVICE_UNAVAILABLE
            }

            // 500 Internal Server Error
            Self::StorageError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation/business errors)
            Self::ValidationFailed | Self::CartEmpty | Self::InvalidTableStatus => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}
