//! QR Client - hosted backend access
//!
//! The ordering app delegates persistence, queries and change notification to
//! a hosted relational backend. This crate wraps that service:
//!
//! - [`RestClient`] - PostgREST-style table/row/RPC calls
//! - [`RealtimeClient`] - websocket change feed (`orders`, `order_items`, `table_status`)
//! - [`Backend`] - the operations the app needs, injected as `Arc<dyn Backend>`
//! - [`RestBackend`] - `Backend` over the hosted service
//! - `MemoryBackend` - in-process `Backend` (feature `memory`)

pub mod backend;
pub mod config;
pub mod error;
pub mod realtime;
pub mod remote;
pub mod rest;

#[cfg(feature = "memory")]
pub mod memory;

pub use backend::{Backend, ChangeReceiver};
pub use config::BackendConfig;
pub use error::{ClientError, ClientResult};
pub use realtime::RealtimeClient;
pub use remote::RestBackend;
pub use rest::RestClient;

#[cfg(feature = "memory")]
pub use memory::{MemoryBackend, Operation};
