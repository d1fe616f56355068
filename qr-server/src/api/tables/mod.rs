//! Table selection API 模块
//!
//! 点餐入口：选择桌号 (和人数)，之后进入 `/t/{code}` 菜单页。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::landing))
        .route("/select", post(handler::select))
}
