//! Cart API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::cart::CartView;
use crate::core::ServerState;
use crate::utils::validation::{validate_set_qty, validate_step};
use crate::utils::AppResult;

/// add / sub 请求体 (可省略，默认 1)
#[derive(Debug, Default, Deserialize)]
pub struct StepRequest {
    #[serde(default)]
    pub qty: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SetQtyRequest {
    pub qty: i64,
}

async fn priced(state: &ServerState) -> CartView {
    let catalog = state.catalog().await;
    state.cart.priced(catalog.items())
}

fn step(payload: Option<Json<StepRequest>>) -> AppResult<i64> {
    let qty = payload.and_then(|Json(p)| p.qty).unwrap_or(1);
    validate_step(qty)?;
    Ok(qty)
}

/// GET /api/cart - 购物车
pub async fn view(State(state): State<ServerState>) -> Json<CartView> {
    Json(priced(&state).await)
}

/// POST /api/cart/items/:id/add - 加一份
pub async fn add(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Option<Json<StepRequest>>,
) -> AppResult<Json<CartView>> {
    let qty = step(payload)?;
    state.cart.add(&id, qty);
    Ok(Json(priced(&state).await))
}

/// POST /api/cart/items/:id/sub - 减一份
pub async fn sub(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Option<Json<StepRequest>>,
) -> AppResult<Json<CartView>> {
    let qty = step(payload)?;
    state.cart.sub(&id, qty);
    Ok(Json(priced(&state).await))
}

/// PUT /api/cart/items/:id - 设置数量
pub async fn set_qty(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SetQtyRequest>,
) -> AppResult<Json<CartView>> {
    validate_set_qty(payload.qty)?;
    state.cart.set_qty(&id, payload.qty);
    Ok(Json(priced(&state).await))
}

/// DELETE /api/cart - 清空
pub async fn clear(State(state): State<ServerState>) -> Json<CartView> {
    state.cart.clear();
    Json(priced(&state).await)
}
