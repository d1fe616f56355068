//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order errors
//! - 6xxx: Product errors
//! - 7xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,

    // ==================== 1xxx: Auth ====================
    /// Kitchen console is locked
    NotAuthenticated = 1001,
    /// Wrong kitchen passcode
    InvalidPasscode = 1002,

    // ==================== 4xxx: Order ====================
    /// Cart / order is empty
    CartEmpty = 4007,
    /// One of the checkout steps failed
    OrderSubmitFailed = 4008,

    // ==================== 6xxx: Product ====================
    /// Menu item not found
    ProductNotFound = 6001,

    // ==================== 7xxx: Table ====================
    /// Invalid order status for a table
    InvalidTableStatus = 7002,

    // ==================== 9xxx: System ====================
    /// Local storage error
    StorageError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Hosted backend returned an error
    BackendError = 9101,
    /// Hosted backend is not configured (degraded mode)
    BackendNotConfigured = 9102,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",

            // Auth
            ErrorCode::NotAuthenticated => "Kitchen console is locked",
            ErrorCode::InvalidPasscode => "Wrong passcode",

            // Order
            ErrorCode::CartEmpty => "Cart is empty",
            ErrorCode::OrderSubmitFailed => "Failed to submit order",

            // Product
            ErrorCode::ProductNotFound => "Menu item not found",

            // Table
            ErrorCode::InvalidTableStatus => "Invalid table status",

            // System
            ErrorCode::StorageError => "Local storage error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::BackendError => "Backend request failed",
            ErrorCode::BackendNotConfigured => "Backend is not configured",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidPasscode),

            4007 => Ok(ErrorCode::CartEmpty),
            4008 => Ok(ErrorCode::OrderSubmitFailed),

            6001 => Ok(ErrorCode::ProductNotFound),

            7002 => Ok(ErrorCode::InvalidTableStatus),

            9002 => Ok(ErrorCode::StorageError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9101 => Ok(ErrorCode::BackendError),
            9102 => Ok(ErrorCode::BackendNotConfigured),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
