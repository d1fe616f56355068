//! Kitchen console handlers
//!
//! 后端调用失败时返回 200 和带 `notice` 的面板，而不是错误状态码；
//! 只有未配置后端 (503) 和参数错误会以错误返回。

use std::convert::Infallible;
use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use shared::models::OrderStatus;

use crate::core::ServerState;
use crate::kitchen::KitchenBoard;
use crate::utils::validation::{MAX_PASSCODE_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub passcode: String,
}

#[derive(Debug, Serialize)]
pub struct GateStatus {
    pub unlocked: bool,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

/// POST /api/kitchen/login - 输入口令
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<GateStatus>> {
    validate_required_text(&payload.passcode, "passcode", MAX_PASSCODE_LEN)?;
    state.kitchen.login(&payload.passcode)?;
    Ok(Json(GateStatus { unlocked: true }))
}

/// POST /api/kitchen/logout - 锁定
pub async fn logout(State(state): State<ServerState>) -> AppResult<Json<GateStatus>> {
    state.kitchen.logout()?;
    Ok(Json(GateStatus { unlocked: false }))
}

/// GET /api/kitchen/board - 订单 + 桌台状态 + 今日合计
pub async fn board(State(state): State<ServerState>) -> AppResult<Json<KitchenBoard>> {
    Ok(Json(state.kitchen.fetch_board().await?))
}

/// PUT /api/kitchen/tables/:code/status - 状态流转
pub async fn update_status(
    State(state): State<ServerState>,
    Path(code): Path<String>,
    Json(payload): Json<StatusRequest>,
) -> AppResult<Json<KitchenBoard>> {
    let status = OrderStatus::from_str(&payload.status)
        .map_err(|e| AppError::with_message(ErrorCode::InvalidTableStatus, e.to_string()))?;
    Ok(Json(state.kitchen.update_status(&code, status).await?))
}

/// POST /api/kitchen/tables/:code/toggle - 展开/收起
pub async fn toggle(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> Json<KitchenBoard> {
    Json(state.kitchen.toggle_expanded(&code))
}

/// DELETE /api/kitchen/tables/:code - 删除整桌订单和状态
pub async fn delete_table(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<KitchenBoard>> {
    Ok(Json(state.kitchen.delete_table(&code).await?))
}

/// DELETE /api/kitchen/orders/:order_id/items/:item_id - 删除一道菜并重算订单
pub async fn delete_order_item(
    State(state): State<ServerState>,
    Path((order_id, item_id)): Path<(String, String)>,
) -> AppResult<Json<KitchenBoard>> {
    Ok(Json(state.kitchen.delete_order_item(&item_id, &order_id).await?))
}

/// GET /api/kitchen/daily-total - 刷新今日合计
pub async fn refresh_daily_total(
    State(state): State<ServerState>,
) -> AppResult<Json<KitchenBoard>> {
    Ok(Json(state.kitchen.refresh_daily_total().await?))
}

/// POST /api/kitchen/daily-total/reset - 今日合计清零
pub async fn reset_daily_total(
    State(state): State<ServerState>,
) -> AppResult<Json<KitchenBoard>> {
    Ok(Json(state.kitchen.reset_daily_total().await?))
}

/// GET /api/kitchen/events - 面板推送
///
/// 先推送当前面板，之后每次重新拉取或操作后推送一次；锁定后结束。
pub async fn events(
    State(state): State<ServerState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = state
        .kitchen
        .board_stream()
        .map(|board| Ok::<_, Infallible>(board_event(&board)));

    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn board_event(board: &KitchenBoard) -> Event {
    match serde_json::to_string(board) {
        Ok(data) => Event::default().event("board").data(data),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize kitchen board");
            Event::default().event("error").data("serialization failed")
        }
    }
}
