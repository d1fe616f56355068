//! Menu API 模块
//!
//! 按桌浏览菜单 (分类 + 关键字) 和菜品详情。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/tables/{code}/menu", get(handler::browse))
        .route("/api/items/{id}", get(handler::item_detail))
}
