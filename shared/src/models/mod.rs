//! Data models
//!
//! Shared between qr-server and qr-client.
//! Field names follow the backend column names so rows deserialize directly.

pub mod change;
pub mod daily_stats;
pub mod menu;
pub mod order;
pub mod serde_helpers;
pub mod table_status;

// Re-exports
pub use change::*;
pub use daily_stats::*;
pub use menu::*;
pub use order::*;
pub use table_status::*;
