//! Table Status Model

use super::OrderStatus;
use serde::{Deserialize, Serialize};

/// 桌台状态 (`table_status` 表，table_code 唯一)
///
/// 反映该桌所有订单的最近一次状态变更。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableStatus {
    pub table_code: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Upsert payload for `table_status`
#[derive(Debug, Clone, Serialize)]
pub struct TableStatusUpsert {
    pub table_code: String,
    pub status: OrderStatus,
}

/// Update payload for `table_status`
#[derive(Debug, Clone, Serialize)]
pub struct TableStatusUpdate {
    pub status: OrderStatus,
    pub updated_at: String,
}
