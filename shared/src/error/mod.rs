//! Unified error system for the QR ordering workspace
//!
//! This module provides the error handling shared by the server and client crates:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ErrorBody`]: JSON body written for an [`AppError`]
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors (kitchen passcode gate)
//! - 4xxx: Order errors
//! - 6xxx: Product / menu errors
//! - 7xxx: Table errors
//! - 9xxx: System errors (local storage, hosted backend)
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::CartEmpty);
//!
//! // Create an error with custom message
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "Quantity must be positive");
//!
//! // Create an error with details
//! let err = AppError::validation("Missing required field")
//!     .with_detail("field", "table_code");
//!
//! // Body sent over HTTP
//! let body = ErrorBody::from(&err);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
