//! Order API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::orders::{OrderReceipt, checkout};
use crate::utils::AppResult;
use crate::utils::validation::validate_table_code;

#[derive(Debug, Deserialize)]
pub struct SubmitOrderRequest {
    pub table_code: String,
}

#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    #[serde(rename = "orderId", default)]
    pub order_id: String,
    pub table: Option<String>,
}

/// POST /api/orders - 提交购物车
///
/// 成功后清空购物车；失败时购物车保持不变。
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<SubmitOrderRequest>,
) -> AppResult<Json<OrderReceipt>> {
    let table_code = payload.table_code.trim();
    validate_table_code(table_code)?;

    let backend = state.backend()?;
    let catalog = state.catalog().await;
    let receipt = checkout(Some(backend), &state.cart, &catalog, table_code).await?;
    Ok(Json(receipt))
}

/// GET /api/orders/success?orderId=&table= - 下单成功页
pub async fn success(Query(params): Query<SuccessQuery>) -> Json<OrderReceipt> {
    Json(OrderReceipt::new(params.order_id, params.table))
}
