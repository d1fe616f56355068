//! Cart API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/cart | GET | 购物车 (含价格、合计) |
//! | /api/cart | DELETE | 清空 |
//! | /api/cart/items/{id} | PUT | 设置数量 (≤0 删除) |
//! | /api/cart/items/{id}/add | POST | 增加 (默认 1) |
//! | /api/cart/items/{id}/sub | POST | 减少 (默认 1) |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::view).delete(handler::clear))
        .route("/items/{id}", put(handler::set_qty))
        .route("/items/{id}/add", post(handler::add))
        .route("/items/{id}/sub", post(handler::sub))
}
