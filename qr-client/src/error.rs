//! Client error types

use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected the call
    #[error("{message}")]
    Api {
        status: u16,
        /// Backend error code (e.g. `PGRST116`, `23505`)
        code: Option<String>,
        message: String,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Realtime channel error
    #[error("Realtime error: {0}")]
    Realtime(String),

    /// Operation not offered by this backend
    #[error("Unavailable: {0}")]
    Unavailable(String),
}

impl ClientError {
    /// Message shown to the user when this call fails
    pub fn message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match &err {
            ClientError::Http(e) if e.is_timeout() => {
                AppError::with_message(ErrorCode::TimeoutError, err.message())
            }
            ClientError::Http(e) if e.is_connect() => {
                AppError::with_message(ErrorCode::NetworkError, err.message())
            }
            _ => AppError::backend(err.message()),
        }
    }
}
