//! Backend abstraction
//!
//! Every remote operation the ordering app performs goes through [`Backend`].
//! The server holds it as `Option<Arc<dyn Backend>>`; `None` means no backend
//! is configured and the app runs in degraded (browse-only) mode.

use crate::ClientResult;
use async_trait::async_trait;
use shared::models::{
    ChangeEvent, MenuItem, NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, TableStatus,
};
use tokio::sync::broadcast;

/// Receiver side of the change feed
pub type ChangeReceiver = broadcast::Receiver<ChangeEvent>;

#[async_trait]
pub trait Backend: Send + Sync {
    // ========== Menu ==========

    /// All rows of `menu_items`
    async fn list_menu_items(&self) -> ClientResult<Vec<MenuItem>>;

    // ========== Table status ==========

    /// Insert or overwrite the status row keyed by `table_code`
    async fn upsert_table_status(&self, table_code: &str, status: OrderStatus) -> ClientResult<()>;

    /// All table status rows, most recently updated first
    async fn list_table_status(&self) -> ClientResult<Vec<TableStatus>>;

    /// Set status and stamp `updated_at`
    async fn update_table_status(&self, table_code: &str, status: OrderStatus) -> ClientResult<()>;

    async fn delete_table_status(&self, table_code: &str) -> ClientResult<()>;

    // ========== Orders ==========

    /// Insert one order and return the stored row
    async fn insert_order(&self, order: &NewOrder) -> ClientResult<Order>;

    async fn insert_order_items(&self, items: &[NewOrderItem]) -> ClientResult<()>;

    /// All orders with their items, newest first
    async fn list_orders(&self) -> ClientResult<Vec<Order>>;

    /// Delete every order of a table (items follow by cascade)
    async fn delete_orders_by_table(&self, table_code: &str) -> ClientResult<()>;

    async fn delete_order_item(&self, item_id: &str) -> ClientResult<()>;

    /// Remaining items of one order
    async fn list_order_items(&self, order_id: &str) -> ClientResult<Vec<OrderItem>>;

    async fn update_order_total(&self, order_id: &str, total: i64) -> ClientResult<()>;

    async fn delete_order(&self, order_id: &str) -> ClientResult<()>;

    // ========== Daily stats ==========

    /// Total stored for `day` (`YYYY-MM-DD`), if a row exists
    async fn get_daily_total(&self, day: &str) -> ClientResult<Option<i64>>;

    /// Total of the most recent day on record
    async fn latest_daily_total(&self) -> ClientResult<Option<i64>>;

    async fn upsert_daily_total(&self, day: &str, total: i64) -> ClientResult<()>;

    /// Server-side atomic increment of today's total
    async fn add_daily_total(&self, amount: i64) -> ClientResult<()>;

    // ========== Change feed ==========

    /// Subscribe to row changes on `orders`, `order_items` and `table_status`
    fn subscribe(&self) -> ChangeReceiver;
}
