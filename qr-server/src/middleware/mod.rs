//! HTTP 中间件
//!
//! - [`logging_middleware`] - 请求日志
//! - [`require_kitchen_access`] - 后厨面板门禁

mod gate;
mod logging;

pub use gate::require_kitchen_access;
pub use logging::logging_middleware;
