//! Kitchen console API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/kitchen/login | POST | 输入口令 (公开) |
//! | /api/kitchen/logout | POST | 锁定 |
//! | /api/kitchen/board | GET | 重新拉取面板 |
//! | /api/kitchen/events | GET | 面板推送 (SSE) |
//! | /api/kitchen/tables/{code}/status | PUT | 状态流转 |
//! | /api/kitchen/tables/{code}/toggle | POST | 展开/收起 |
//! | /api/kitchen/tables/{code} | DELETE | 删除整桌 |
//! | /api/kitchen/orders/{order_id}/items/{item_id} | DELETE | 删除一道菜 |
//! | /api/kitchen/daily-total | GET | 刷新今日合计 |
//! | /api/kitchen/daily-total/reset | POST | 今日合计清零 |
//!
//! 除 login 外均由 [`require_kitchen_access`](crate::middleware::require_kitchen_access) 保护。

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/kitchen", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/logout", post(handler::logout))
        .route("/board", get(handler::board))
        .route("/events", get(handler::events))
        .route("/tables/{code}", delete(handler::delete_table))
        .route("/tables/{code}/status", put(handler::update_status))
        .route("/tables/{code}/toggle", post(handler::toggle))
        .route(
            "/orders/{order_id}/items/{item_id}",
            delete(handler::delete_order_item),
        )
        .route("/daily-total", get(handler::refresh_daily_total))
        .route("/daily-total/reset", post(handler::reset_daily_total))
}
