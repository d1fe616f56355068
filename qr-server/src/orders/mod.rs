//! Order submission
//!
//! 下单是三个依次执行的后端调用 (非事务):
//!
//! 1. upsert `table_status` → pending
//! 2. insert `orders`，取回生成的 id
//! 3. insert `order_items` (名称/单价快照)
//!
//! 任一步失败即返回该步的错误信息，之前已完成的步骤不会回滚。

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::utils::{AppError, AppResult, ErrorCode};
use qr_client::{Backend, ClientError};
use serde::Serialize;
use shared::models::{MenuItem, NewOrder, NewOrderItem, OrderStatus};
use std::sync::Arc;

const TABLE_STATUS_FAILED: &str = "Failed to update table status";
const ORDER_FAILED: &str = "Failed to create order";
const ORDER_ITEMS_FAILED: &str = "Failed to create order items";

/// What gets submitted for one checkout
#[derive(Debug, Clone)]
pub struct OrderInput {
    pub table_code: String,
    pub items: Vec<(MenuItem, i64)>,
    pub total: i64,
}

impl OrderInput {
    /// Build from priced lines; total = Σ price × qty
    pub fn new(table_code: impl Into<String>, items: Vec<(MenuItem, i64)>) -> Self {
        let total = items.iter().map(|(item, qty)| item.price * qty).sum();
        Self {
            table_code: table_code.into(),
            items,
            total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum SubmitOutcome {
    Submitted { order_id: String },
    Failed { message: String },
}

fn failed(err: ClientError, fallback: &str) -> SubmitOutcome {
    let message = err.message();
    tracing::warn!(error = %message, step = fallback, "Order submission failed");
    SubmitOutcome::Failed {
        message: if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        },
    }
}

/// Run the three submission steps in order
pub async fn submit_order(backend: &dyn Backend, input: &OrderInput) -> SubmitOutcome {
    if let Err(e) = backend
        .upsert_table_status(&input.table_code, OrderStatus::Pending)
        .await
    {
        return failed(e, TABLE_STATUS_FAILED);
    }

    let order = NewOrder {
        table_code: input.table_code.clone(),
        status: OrderStatus::Pending,
        total: input.total,
    };
    let order = match backend.insert_order(&order).await {
        Ok(order) => order,
        Err(e) => return failed(e, ORDER_FAILED),
    };

    let lines: Vec<NewOrderItem> = input
        .items
        .iter()
        .map(|(item, qty)| NewOrderItem {
            order_id: order.id.clone(),
            item_id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            qty: *qty,
        })
        .collect();

    if let Err(e) = backend.insert_order_items(&lines).await {
        // order row stays without lines
        return failed(e, ORDER_ITEMS_FAILED);
    }

    tracing::info!(
        order_id = %order.id,
        table_code = %input.table_code,
        total = input.total,
        lines = lines.len(),
        "Order submitted"
    );
    SubmitOutcome::Submitted { order_id: order.id }
}

/// Confirmation view data
#[derive(Debug, Clone, Serialize)]
pub struct OrderReceipt {
    pub order_id: String,
    pub table_code: Option<String>,
    /// Where "continue ordering" leads
    pub back_link: String,
    /// Confirmation page URL
    pub success_link: String,
}

impl OrderReceipt {
    pub fn new(order_id: impl Into<String>, table_code: Option<String>) -> Self {
        let order_id = order_id.into();
        let table_code = table_code.filter(|t| !t.is_empty());
        let back_link = match &table_code {
            Some(table) => format!("/t/{table}"),
            None => "/".to_string(),
        };
        let success_link = match &table_code {
            Some(table) => format!("/order/success?orderId={order_id}&table={table}"),
            None => format!("/order/success?orderId={order_id}"),
        };
        Self {
            order_id,
            table_code,
            back_link,
            success_link,
        }
    }
}

/// Submit the current cart for `table_code`
///
/// Only lines whose item is still on the menu are submitted. The cart is
/// cleared only after all three steps succeed.
pub async fn checkout(
    backend: Option<&Arc<dyn Backend>>,
    cart: &CartStore,
    catalog: &Catalog,
    table_code: &str,
) -> AppResult<OrderReceipt> {
    let backend = backend.ok_or_else(AppError::backend_not_configured)?;

    let lines = cart.priced(catalog.items()).orderable();
    if lines.is_empty() {
        return Err(AppError::new(ErrorCode::CartEmpty));
    }

    let input = OrderInput::new(table_code, lines);
    match submit_order(backend.as_ref(), &input).await {
        SubmitOutcome::Submitted { order_id } => {
            cart.clear();
            Ok(OrderReceipt::new(order_id, Some(table_code.to_string())))
        }
        SubmitOutcome::Failed { message } => Err(AppError::with_message(
            ErrorCode::OrderSubmitFailed,
            format!("Order failed: {message}"),
        )),
    }
}
