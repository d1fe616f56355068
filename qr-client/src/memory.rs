//! In-process backend
//!
//! Keeps every table in memory and emits change events like the hosted
//! service does. Individual operations can be made to fail, and the
//! `add_daily_total` procedure can be switched off, to exercise the
//! fallback paths.

use crate::backend::{Backend, ChangeReceiver};
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared::models::{
    ChangeEvent, ChangeKind, MenuItem, NewOrder, NewOrderItem, Order, OrderItem, OrderStatus,
    Relation, TableStatus,
};
use std::collections::{BTreeMap, HashSet};
use tokio::sync::broadcast;

/// Backend operations, used to inject failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListMenuItems,
    UpsertTableStatus,
    ListTableStatus,
    UpdateTableStatus,
    DeleteTableStatus,
    InsertOrder,
    InsertOrderItems,
    ListOrders,
    DeleteOrdersByTable,
    DeleteOrderItem,
    ListOrderItems,
    UpdateOrderTotal,
    DeleteOrder,
    GetDailyTotal,
    LatestDailyTotal,
    UpsertDailyTotal,
    AddDailyTotal,
}

#[derive(Default)]
struct Tables {
    seq: u64,
    menu_items: Vec<MenuItem>,
    /// (insert sequence, order without embedded items)
    orders: Vec<(u64, Order)>,
    order_items: Vec<OrderItem>,
    /// (update sequence, row)
    table_status: Vec<(u64, TableStatus)>,
    daily_stats: BTreeMap<String, i64>,
}

impl Tables {
    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }
}

/// 内存后端
pub struct MemoryBackend {
    tables: Mutex<Tables>,
    failures: Mutex<HashSet<Operation>>,
    rpc_available: Mutex<bool>,
    changes: broadcast::Sender<ChangeEvent>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(256);
        Self {
            tables: Mutex::new(Tables::default()),
            failures: Mutex::new(HashSet::new()),
            rpc_available: Mutex::new(true),
            changes,
        }
    }

    /// Seed `menu_items`
    pub fn with_menu(self, items: Vec<MenuItem>) -> Self {
        self.tables.lock().menu_items = items;
        self
    }

    /// Make `op` fail until [`clear_failure`](Self::clear_failure)
    pub fn fail_on(&self, op: Operation) {
        self.failures.lock().insert(op);
    }

    pub fn clear_failure(&self, op: Operation) {
        self.failures.lock().remove(&op);
    }

    /// Toggle the `add_daily_total` procedure
    pub fn set_rpc_available(&self, available: bool) {
        *self.rpc_available.lock() = available;
    }

    // ========== Inspection ==========

    /// All orders with items, newest first
    pub fn orders(&self) -> Vec<Order> {
        let tables = self.tables.lock();
        Self::collect_orders(&tables)
    }

    pub fn table_statuses(&self) -> Vec<TableStatus> {
        let tables = self.tables.lock();
        let mut rows = tables.table_status.clone();
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        rows.into_iter().map(|(_, row)| row).collect()
    }

    pub fn daily_total(&self, day: &str) -> Option<i64> {
        self.tables.lock().daily_stats.get(day).copied()
    }

    pub fn seed_daily_total(&self, day: &str, total: i64) {
        self.tables
            .lock()
            .daily_stats
            .insert(day.to_string(), total);
    }

    /// Push a change event as if it came from the backend
    pub fn emit(&self, relation: Relation, kind: ChangeKind) {
        let _ = self.changes.send(ChangeEvent::new(relation, kind));
    }

    fn check(&self, op: Operation) -> ClientResult<()> {
        if self.failures.lock().contains(&op) {
            return Err(ClientError::Api {
                status: 500,
                code: None,
                message: format!("{op:?} failed"),
            });
        }
        Ok(())
    }

    fn collect_orders(tables: &Tables) -> Vec<Order> {
        let mut rows = tables.orders.clone();
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        rows.into_iter()
            .map(|(_, mut order)| {
                order.order_items = tables
                    .order_items
                    .iter()
                    .filter(|item| item.order_id == order.id)
                    .cloned()
                    .collect();
                order
            })
            .collect()
    }

    fn remove_orders_where(tables: &mut Tables, pred: impl Fn(&Order) -> bool) -> usize {
        let removed: HashSet<String> = tables
            .orders
            .iter()
            .filter(|(_, o)| pred(o))
            .map(|(_, o)| o.id.clone())
            .collect();
        tables.orders.retain(|(_, o)| !removed.contains(&o.id));
        // order_items.order_id ON DELETE CASCADE
        tables
            .order_items
            .retain(|item| !removed.contains(&item.order_id));
        removed.len()
    }

    fn today() -> String {
        chrono::Local::now().format("%Y-%m-%d").to_string()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn list_menu_items(&self) -> ClientResult<Vec<MenuItem>> {
        self.check(Operation::ListMenuItems)?;
        Ok(self.tables.lock().menu_items.clone())
    }

    async fn upsert_table_status(&self, table_code: &str, status: OrderStatus) -> ClientResult<()> {
        self.check(Operation::UpsertTableStatus)?;
        let kind = {
            let mut tables = self.tables.lock();
            let seq = tables.next_seq();
            let now = chrono::Utc::now().to_rfc3339();
            match tables
                .table_status
                .iter_mut()
                .find(|(_, row)| row.table_code == table_code)
            {
                Some((row_seq, row)) => {
                    *row_seq = seq;
                    row.status = status;
                    row.updated_at = Some(now);
                    ChangeKind::Update
                }
                None => {
                    tables.table_status.push((
                        seq,
                        TableStatus {
                            table_code: table_code.to_string(),
                            status,
                            updated_at: Some(now),
                        },
                    ));
                    ChangeKind::Insert
                }
            }
        };
        self.emit(Relation::TableStatus, kind);
        Ok(())
    }

    async fn list_table_status(&self) -> ClientResult<Vec<TableStatus>> {
        self.check(Operation::ListTableStatus)?;
        Ok(self.table_statuses())
    }

    async fn update_table_status(&self, table_code: &str, status: OrderStatus) -> ClientResult<()> {
        self.check(Operation::UpdateTableStatus)?;
        let updated = {
            let mut tables = self.tables.lock();
            let seq = tables.next_seq();
            match tables
                .table_status
                .iter_mut()
                .find(|(_, row)| row.table_code == table_code)
            {
                Some((row_seq, row)) => {
                    *row_seq = seq;
                    row.status = status;
                    row.updated_at = Some(chrono::Utc::now().to_rfc3339());
                    true
                }
                None => false,
            }
        };
        if updated {
            self.emit(Relation::TableStatus, ChangeKind::Update);
        }
        Ok(())
    }

    async fn delete_table_status(&self, table_code: &str) -> ClientResult<()> {
        self.check(Operation::DeleteTableStatus)?;
        self.tables
            .lock()
            .table_status
            .retain(|(_, row)| row.table_code != table_code);
        self.emit(Relation::TableStatus, ChangeKind::Delete);
        Ok(())
    }

    async fn insert_order(&self, order: &NewOrder) -> ClientResult<Order> {
        self.check(Operation::InsertOrder)?;
        let row = Order {
            id: uuid::Uuid::new_v4().to_string(),
            table_code: order.table_code.clone(),
            status: order.status,
            total: order.total,
            created_at: chrono::Utc::now().to_rfc3339(),
            order_items: Vec::new(),
        };
        {
            let mut tables = self.tables.lock();
            let seq = tables.next_seq();
            tables.orders.push((seq, row.clone()));
        }
        self.emit(Relation::Orders, ChangeKind::Insert);
        Ok(row)
    }

    async fn insert_order_items(&self, items: &[NewOrderItem]) -> ClientResult<()> {
        self.check(Operation::InsertOrderItems)?;
        {
            let mut tables = self.tables.lock();
            for item in items {
                if !tables.orders.iter().any(|(_, o)| o.id == item.order_id) {
                    return Err(ClientError::Api {
                        status: 409,
                        code: Some("23503".to_string()),
                        message: "insert or update on table \"order_items\" violates foreign key constraint".to_string(),
                    });
                }
            }
            for item in items {
                tables.order_items.push(OrderItem {
                    id: uuid::Uuid::new_v4().to_string(),
                    order_id: item.order_id.clone(),
                    item_id: item.item_id.clone(),
                    name: item.name.clone(),
                    price: item.price,
                    qty: item.qty,
                });
            }
        }
        self.emit(Relation::OrderItems, ChangeKind::Insert);
        Ok(())
    }

    async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        self.check(Operation::ListOrders)?;
        Ok(self.orders())
    }

    async fn delete_orders_by_table(&self, table_code: &str) -> ClientResult<()> {
        self.check(Operation::DeleteOrdersByTable)?;
        let removed = {
            let mut tables = self.tables.lock();
            Self::remove_orders_where(&mut tables, |o| o.table_code == table_code)
        };
        if removed > 0 {
            self.emit(Relation::Orders, ChangeKind::Delete);
        }
        Ok(())
    }

    async fn delete_order_item(&self, item_id: &str) -> ClientResult<()> {
        self.check(Operation::DeleteOrderItem)?;
        self.tables.lock().order_items.retain(|item| item.id != item_id);
        self.emit(Relation::OrderItems, ChangeKind::Delete);
        Ok(())
    }

    async fn list_order_items(&self, order_id: &str) -> ClientResult<Vec<OrderItem>> {
        self.check(Operation::ListOrderItems)?;
        Ok(self
            .tables
            .lock()
            .order_items
            .iter()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn update_order_total(&self, order_id: &str, total: i64) -> ClientResult<()> {
        self.check(Operation::UpdateOrderTotal)?;
        if let Some((_, order)) = self
            .tables
            .lock()
            .orders
            .iter_mut()
            .find(|(_, o)| o.id == order_id)
        {
            order.total = total;
        }
        self.emit(Relation::Orders, ChangeKind::Update);
        Ok(())
    }

    async fn delete_order(&self, order_id: &str) -> ClientResult<()> {
        self.check(Operation::DeleteOrder)?;
        {
            let mut tables = self.tables.lock();
            Self::remove_orders_where(&mut tables, |o| o.id == order_id);
        }
        self.emit(Relation::Orders, ChangeKind::Delete);
        Ok(())
    }

    async fn get_daily_total(&self, day: &str) -> ClientResult<Option<i64>> {
        self.check(Operation::GetDailyTotal)?;
        Ok(self.daily_total(day))
    }

    async fn latest_daily_total(&self) -> ClientResult<Option<i64>> {
        self.check(Operation::LatestDailyTotal)?;
        Ok(self
            .tables
            .lock()
            .daily_stats
            .iter()
            .next_back()
            .map(|(_, total)| *total))
    }

    async fn upsert_daily_total(&self, day: &str, total: i64) -> ClientResult<()> {
        self.check(Operation::UpsertDailyTotal)?;
        self.seed_daily_total(day, total);
        self.emit(Relation::DailyStats, ChangeKind::Update);
        Ok(())
    }

    async fn add_daily_total(&self, amount: i64) -> ClientResult<()> {
        self.check(Operation::AddDailyTotal)?;
        if !*self.rpc_available.lock() {
            return Err(ClientError::Unavailable(
                "function add_daily_total(amount) not found".to_string(),
            ));
        }
        *self
            .tables
            .lock()
            .daily_stats
            .entry(Self::today())
            .or_insert(0) += amount;
        self.emit(Relation::DailyStats, ChangeKind::Update);
        Ok(())
    }

    fn subscribe(&self) -> ChangeReceiver {
        self.changes.subscribe()
    }
}
