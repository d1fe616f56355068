//! Shared types for the QR ordering workspace
//!
//! Common types used across the server and client crates: domain models,
//! error types, response structures and money formatting.

pub mod error;
pub mod models;
pub mod money;

// Re-exports
pub use error::{AppError, AppResult, ErrorBody, ErrorCode};
pub use http;
pub use money::format_jpy;
pub use serde::{Deserialize, Serialize};
