//! Kitchen Console
//!
//! 后厨面板：按桌分组的订单、状态流转、删除菜品/整桌、今日营业额。
//!
//! # 状态
//!
//! 每桌状态 ∈ {pending, preparing, done}，只由员工操作改变。
//! 标记 done 时：
//!
//! 1. 本地今日合计立即累加并写入本地存储 (乐观)
//! 2. 调用后端 `add_daily_total`，失败则读取后端当日值再 upsert
//! 3. 更新 `table_status`
//! 4. 提示 `Completed (+¥…)`，重新拉取并对账
//!
//! 所有后端失败都以 `notice` 返回，不会中断面板。

mod board;
pub mod daily;
pub mod optimistic;

pub use board::{KitchenBoard, TableCard};
pub use daily::{DailyLedger, Reconciled, reconcile};

use crate::store::{LocalStore, keys};
use crate::utils::time::today_key;
use crate::utils::{AppError, AppResult};
use futures::Stream;
use parking_lot::Mutex;
use qr_client::{Backend, ClientError};
use shared::format_jpy;
use shared::models::{Order, OrderStatus, TableStatus, lines_total};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::broadcast;

const BOARD_CHANNEL_CAPACITY: usize = 64;

/// Board state held between requests
#[derive(Default)]
struct ConsoleView {
    orders: Vec<Order>,
    tables: Vec<TableStatus>,
    expanded: HashSet<String>,
    daily_total: i64,
    notice: Option<String>,
}

struct Inner {
    backend: Option<Arc<dyn Backend>>,
    store: LocalStore,
    admin_code: String,
    ledger: DailyLedger,
    view: Mutex<ConsoleView>,
    boards: broadcast::Sender<KitchenBoard>,
}

#[derive(Clone)]
pub struct KitchenConsole {
    inner: Arc<Inner>,
}

impl KitchenConsole {
    pub fn new(
        backend: Option<Arc<dyn Backend>>,
        store: LocalStore,
        admin_code: impl Into<String>,
    ) -> Self {
        let (boards, _) = broadcast::channel(BOARD_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                backend,
                ledger: DailyLedger::new(store.clone()),
                store,
                admin_code: admin_code.into(),
                view: Mutex::new(ConsoleView::default()),
                boards,
            }),
        }
    }

    fn backend(&self) -> AppResult<&Arc<dyn Backend>> {
        self.inner
            .backend
            .as_ref()
            .ok_or_else(AppError::backend_not_configured)
    }

    // ========== Gate ==========

    /// Compare against the configured code and remember it locally
    ///
    /// An empty configured code never matches.
    pub fn login(&self, passcode: &str) -> AppResult<()> {
        let admin_code = &self.inner.admin_code;
        if admin_code.is_empty() || passcode != admin_code {
            tracing::warn!("Kitchen login rejected");
            return Err(AppError::invalid_passcode());
        }
        self.inner.store.set_string(keys::ADMIN, passcode)?;
        tracing::info!("Kitchen console unlocked");
        Ok(())
    }

    pub fn logout(&self) -> AppResult<()> {
        self.inner.store.remove(keys::ADMIN)?;
        tracing::info!("Kitchen console locked");
        // 唤醒推送流，让它们看到已锁定并结束
        self.publish();
        Ok(())
    }

    /// Stored passcode still equals the configured one
    pub fn is_unlocked(&self) -> bool {
        let admin_code = &self.inner.admin_code;
        if admin_code.is_empty() {
            return false;
        }
        matches!(
            self.inner.store.get_string(keys::ADMIN),
            Ok(Some(saved)) if &saved == admin_code
        )
    }

    // ========== Board ==========

    /// Board updates pushed after every refetch or mutation
    pub fn subscribe(&self) -> broadcast::Receiver<KitchenBoard> {
        self.inner.boards.subscribe()
    }

    /// Current board first, then every published board until the console is locked
    pub fn board_stream(&self) -> impl Stream<Item = KitchenBoard> + Send + 'static + use<> {
        let state = (Some(self.board()), self.subscribe(), self.clone());
        futures::stream::unfold(state, |(pending, mut rx, console)| async move {
            if let Some(board) = pending {
                return Some((board, (None, rx, console)));
            }
            loop {
                match rx.recv().await {
                    Ok(board) if console.is_unlocked() => {
                        return Some((board, (None, rx, console)));
                    }
                    Ok(_) => {
                        tracing::debug!("Kitchen console locked, closing board stream");
                        return None;
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::debug!("Board stream lagged {n} updates");
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
    }

    /// Current board from cached state
    pub fn board(&self) -> KitchenBoard {
        let view = self.inner.view.lock();
        KitchenBoard::build(
            &view.orders,
            &view.tables,
            &view.expanded,
            view.daily_total,
            view.notice.clone(),
        )
    }

    fn publish(&self) -> KitchenBoard {
        let board = self.board();
        // No subscribers is fine
        let _ = self.inner.boards.send(board.clone());
        board
    }

    fn set_notice(&self, notice: impl Into<String>) -> KitchenBoard {
        self.inner.view.lock().notice = Some(notice.into());
        self.publish()
    }

    /// Load orders, table statuses and reconcile today's total
    pub async fn fetch_board(&self) -> AppResult<KitchenBoard> {
        let backend = self.backend()?;

        let orders = backend.list_orders().await?;
        let tables = backend.list_table_status().await?;

        let day = today_key();
        let local = self.inner.ledger.read(&day);
        {
            let mut view = self.inner.view.lock();
            if view.daily_total == 0 {
                view.daily_total = local;
            }
        }

        let remote = backend.get_daily_total(&day).await?;
        {
            let mut view = self.inner.view.lock();
            view.orders = orders;
            view.tables = tables;
        }
        if let Some(remote) = remote {
            self.apply_reconcile(backend, &day, local, remote).await;
        }

        Ok(self.publish())
    }

    /// Refetch after a mutation; failures keep the cached board
    async fn refetch(&self) -> KitchenBoard {
        match self.fetch_board().await {
            Ok(board) => board,
            Err(e) => {
                tracing::warn!(error = %e, "Kitchen refetch failed");
                self.publish()
            }
        }
    }

    async fn apply_reconcile(&self, backend: &Arc<dyn Backend>, day: &str, local: i64, remote: i64) {
        let result = reconcile(local, remote);
        self.inner.view.lock().daily_total = result.total;
        if result.write_back {
            tracing::info!(day, local, remote, "Backend daily total behind local, writing back");
            if let Err(e) = backend.upsert_daily_total(day, local).await {
                tracing::warn!(day, error = %e, "Failed to write back daily total");
            }
        }
    }

    pub fn toggle_expanded(&self, table_code: &str) -> KitchenBoard {
        {
            let mut view = self.inner.view.lock();
            if !view.expanded.remove(table_code) {
                view.expanded.insert(table_code.to_string());
            }
        }
        self.publish()
    }

    // ========== Status ==========

    fn table_total(&self, table_code: &str) -> Option<i64> {
        let view = self.inner.view.lock();
        let mut orders = view
            .orders
            .iter()
            .filter(|o| o.table_code == table_code)
            .peekable();
        orders.peek()?;
        Some(orders.map(|o| o.total).sum())
    }

    /// Optimistic local increment, written through to the ledger
    fn bump_local_total(&self, day: &str, amount: i64) {
        let mut view = self.inner.view.lock();
        let base = if view.daily_total == 0 {
            self.inner.ledger.read(day)
        } else {
            view.daily_total
        };
        view.daily_total = base + amount;
        self.inner.ledger.write(day, view.daily_total);
    }

    /// RPC increment, falling back to read-then-upsert
    async fn add_remote_total(
        backend: &Arc<dyn Backend>,
        day: &str,
        amount: i64,
    ) -> Result<(), ClientError> {
        let rpc_err = match backend.add_daily_total(amount).await {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };
        tracing::warn!(error = %rpc_err, "add_daily_total failed, falling back to upsert");

        let current = match backend.get_daily_total(day).await {
            Ok(current) => current.unwrap_or(0),
            Err(_) => return Err(rpc_err),
        };
        backend.upsert_daily_total(day, current + amount).await
    }

    pub async fn update_status(
        &self,
        table_code: &str,
        status: OrderStatus,
    ) -> AppResult<KitchenBoard> {
        let backend = self.backend()?;

        if status == OrderStatus::Done {
            let table_total = match self.table_total(table_code) {
                Some(total) => total,
                None => {
                    // Board not loaded yet for this table
                    let _ = self.fetch_board().await;
                    self.table_total(table_code).unwrap_or(0)
                }
            };
            let day = today_key();
            let day = day.as_str();

            let added = optimistic::run(
                || self.bump_local_total(day, table_total),
                Self::add_remote_total(backend, day, table_total),
                || async move {
                    tracing::warn!(
                        day,
                        table_total,
                        "Daily total kept locally, next reconciliation writes it back"
                    );
                },
            )
            .await;
            if let Err(e) = added {
                return Ok(self.set_notice(format!("Update failed: {}", e.message())));
            }
        }

        if let Err(e) = backend.update_table_status(table_code, status).await {
            return Ok(self.set_notice(format!("Update failed: {}", e.message())));
        }

        let notice = if status == OrderStatus::Done {
            let total = self.table_total(table_code).unwrap_or(0);
            format!("Completed (+{})", format_jpy(total))
        } else {
            format!("Updated to: {}", status.label())
        };
        tracing::info!(table_code, status = %status, "Table status updated");

        self.inner.view.lock().notice = Some(notice);
        let board = self.refetch().await;
        if status == OrderStatus::Done {
            if let Err(e) = self.reconcile_today(backend).await {
                tracing::warn!(table_code, error = %e, "Daily total refresh after completion failed");
                return Ok(self.set_notice(format!("Refresh failed: {}", e.message())));
            }
            return Ok(self.publish());
        }
        Ok(board)
    }

    // ========== Deletion ==========

    /// Delete one order line and recompute its order
    ///
    /// The order is removed when no lines remain.
    pub async fn delete_order_item(&self, item_id: &str, order_id: &str) -> AppResult<KitchenBoard> {
        let backend = self.backend()?;

        if let Err(e) = backend.delete_order_item(item_id).await {
            return Ok(self.set_notice(format!("Delete failed: {}", e.message())));
        }

        let remaining = match backend.list_order_items(order_id).await {
            Ok(items) => items,
            Err(e) => {
                self.inner.view.lock().notice = Some(format!(
                    "Deleted, but recalculation failed: {}",
                    e.message()
                ));
                return Ok(self.refetch().await);
            }
        };

        let next_total = lines_total(&remaining);
        let result = if next_total == 0 {
            backend.delete_order(order_id).await
        } else {
            backend.update_order_total(order_id, next_total).await
        };
        if let Err(e) = result {
            tracing::warn!(order_id, error = %e, "Failed to update order after line deletion");
        }

        self.inner.view.lock().notice = Some("Item deleted".to_string());
        Ok(self.refetch().await)
    }

    fn remove_table_locally(&self, table_code: &str) {
        {
            let mut view = self.inner.view.lock();
            view.tables.retain(|t| t.table_code != table_code);
            view.orders.retain(|o| o.table_code != table_code);
            view.expanded.remove(table_code);
        }
        self.publish();
    }

    /// Delete a table's orders and status row
    ///
    /// The table disappears from the board before the backend confirms; a
    /// failure refetches to restore it.
    pub async fn delete_table(&self, table_code: &str) -> AppResult<KitchenBoard> {
        let backend = self.backend()?;

        let deleted = optimistic::run(
            || self.remove_table_locally(table_code),
            async {
                backend.delete_orders_by_table(table_code).await?;
                backend.delete_table_status(table_code).await
            },
            || async move {
                let _ = self.fetch_board().await;
            },
        )
        .await;

        Ok(match deleted {
            Ok(()) => {
                tracing::info!(table_code, "Table deleted");
                self.set_notice(format!("Table {table_code} deleted"))
            }
            Err(e) => self.set_notice(format!("Delete failed: {}", e.message())),
        })
    }

    // ========== Daily total ==========

    /// Reconcile against today's row, or the latest row when today has none
    async fn reconcile_today(&self, backend: &Arc<dyn Backend>) -> Result<(), ClientError> {
        let day = today_key();
        let local = self.inner.ledger.read(&day);

        let remote = match backend.get_daily_total(&day).await? {
            Some(total) => total,
            None => backend.latest_daily_total().await?.unwrap_or(0),
        };
        self.apply_reconcile(backend, &day, local, remote).await;
        Ok(())
    }

    pub async fn refresh_daily_total(&self) -> AppResult<KitchenBoard> {
        let backend = self.backend()?;
        Ok(match self.reconcile_today(backend).await {
            Ok(()) => self.set_notice("Total refreshed"),
            Err(e) => self.set_notice(format!("Refresh failed: {}", e.message())),
        })
    }

    /// Staff reset of today's total to zero
    pub async fn reset_daily_total(&self) -> AppResult<KitchenBoard> {
        let backend = self.backend()?;
        let day = today_key();

        if let Err(e) = backend.upsert_daily_total(&day, 0).await {
            return Ok(self.set_notice(format!("Reset failed: {}", e.message())));
        }
        self.inner.view.lock().daily_total = 0;
        self.inner.ledger.write(&day, 0);
        tracing::info!(day = %day, "Daily total reset");
        Ok(self.set_notice("Today's total reset"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MENU;
    use crate::orders::{OrderInput, submit_order};
    use qr_client::{MemoryBackend, Operation};
    use shared::ErrorCode;

    const ADMIN: &str = "1234";

    struct Fixture {
        memory: Arc<MemoryBackend>,
        store: LocalStore,
        console: KitchenConsole,
    }

    fn fixture() -> Fixture {
        let memory = Arc::new(MemoryBackend::new());
        let store = LocalStore::open_in_memory().unwrap();
        let backend: Arc<dyn Backend> = memory.clone();
        let console = KitchenConsole::new(Some(backend), store.clone(), ADMIN);
        Fixture {
            memory,
            store,
            console,
        }
    }

    fn item(id: &str) -> shared::models::MenuItem {
        MENU.iter().find(|m| m.id == id).cloned().unwrap()
    }

    async fn place(memory: &MemoryBackend, table: &str, lines: Vec<(&str, i64)>) -> String {
        let input = OrderInput::new(
            table,
            lines.into_iter().map(|(id, qty)| (item(id), qty)).collect(),
        );
        match submit_order(memory, &input).await {
            crate::orders::SubmitOutcome::Submitted { order_id } => order_id,
            other => panic!("submit failed: {other:?}"),
        }
    }

    #[test]
    fn test_gate() {
        let f = fixture();
        assert!(!f.console.is_unlocked());

        let err = f.console.login("0000").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPasscode);
        assert!(!f.console.is_unlocked());

        f.console.login(ADMIN).unwrap();
        assert!(f.console.is_unlocked());

        f.console.logout().unwrap();
        assert!(!f.console.is_unlocked());
    }

    #[tokio::test]
    async fn test_board_stream_ends_on_logout() {
        use futures::StreamExt;
        use std::time::Duration;

        let f = fixture();
        f.console.login(ADMIN).unwrap();
        let mut stream = Box::pin(f.console.board_stream());

        assert!(stream.next().await.is_some());
        f.console.refresh_daily_total().await.unwrap();
        assert!(stream.next().await.is_some());

        f.console.logout().unwrap();
        let next = tokio::time::timeout(Duration::from_secs(1), stream.next())
            .await
            .unwrap();
        assert!(next.is_none());
    }

    #[test]
    fn test_empty_admin_code_never_unlocks() {
        let store = LocalStore::open_in_memory().unwrap();
        let console = KitchenConsole::new(None, store.clone(), "");
        assert!(console.login("").is_err());
        store.set_string(keys::ADMIN, "").unwrap();
        assert!(!console.is_unlocked());
    }

    #[test]
    fn test_changed_admin_code_relocks() {
        let store = LocalStore::open_in_memory().unwrap();
        KitchenConsole::new(None, store.clone(), "old").login("old").unwrap();
        let console = KitchenConsole::new(None, store, "new");
        assert!(!console.is_unlocked());
    }

    #[tokio::test]
    async fn test_without_backend() {
        let console = KitchenConsole::new(None, LocalStore::open_in_memory().unwrap(), ADMIN);
        let err = console.fetch_board().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BackendNotConfigured);
    }

    #[tokio::test]
    async fn test_fetch_board_groups_by_table() {
        let f = fixture();
        place(&f.memory, "3", vec![("1", 2), ("2", 1)]).await;
        place(&f.memory, "1", vec![("4", 1)]).await;

        let board = f.console.fetch_board().await.unwrap();
        assert_eq!(board.order_count, 2);
        assert_eq!(board.item_count, 3);
        // Most recently updated table first
        assert_eq!(board.tables[0].table_code, "1");
        assert_eq!(board.table("3").unwrap().total, 1360);
        assert_eq!(board.table("3").unwrap().status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_mark_done_uses_larger_base() {
        let f = fixture();
        let day = today_key();
        f.memory.seed_daily_total(&day, 5000);
        DailyLedger::new(f.store.clone()).write(&day, 4000);
        place(&f.memory, "3", vec![("1", 2), ("2", 1)]).await;

        let board = f.console.fetch_board().await.unwrap();
        assert_eq!(board.daily_total, 5000);

        let board = f
            .console
            .update_status("3", OrderStatus::Done)
            .await
            .unwrap();
        assert_eq!(board.daily_total, 6360);
        assert_eq!(board.notice.as_deref(), Some("Completed (+¥1,360)"));
        assert_eq!(board.table("3").unwrap().status, OrderStatus::Done);
        assert_eq!(f.memory.daily_total(&day), Some(6360));
        assert_eq!(DailyLedger::new(f.store.clone()).read(&day), 6360);
    }

    #[tokio::test]
    async fn test_mark_done_falls_back_to_upsert() {
        let f = fixture();
        let day = today_key();
        f.memory.seed_daily_total(&day, 1000);
        f.memory.set_rpc_available(false);
        place(&f.memory, "2", vec![("3", 1)]).await;
        f.console.fetch_board().await.unwrap();

        let board = f
            .console
            .update_status("2", OrderStatus::Done)
            .await
            .unwrap();
        assert_eq!(f.memory.daily_total(&day), Some(1360));
        assert_eq!(board.daily_total, 1360);
    }

    #[tokio::test]
    async fn test_mark_done_failure_keeps_local_total() {
        let f = fixture();
        let day = today_key();
        place(&f.memory, "2", vec![("3", 1)]).await;
        f.console.fetch_board().await.unwrap();

        f.memory.set_rpc_available(false);
        f.memory.fail_on(Operation::GetDailyTotal);
        let board = f
            .console
            .update_status("2", OrderStatus::Done)
            .await
            .unwrap();

        assert!(board.notice.as_deref().unwrap().starts_with("Update failed: "));
        assert_eq!(board.daily_total, 360);
        assert_eq!(DailyLedger::new(f.store.clone()).read(&day), 360);
        // Status untouched
        assert_eq!(board.table("2").unwrap().status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_mark_done_refresh_failure_sets_notice() {
        let f = fixture();
        let day = today_key();
        place(&f.memory, "2", vec![("3", 1)]).await;
        f.console.fetch_board().await.unwrap();

        // RPC succeeds, the follow-up read of today's row fails
        f.memory.fail_on(Operation::GetDailyTotal);
        let board = f
            .console
            .update_status("2", OrderStatus::Done)
            .await
            .unwrap();

        assert_eq!(
            board.notice.as_deref(),
            Some("Refresh failed: GetDailyTotal failed")
        );
        assert_eq!(board.daily_total, 360);
        assert_eq!(f.memory.daily_total(&day), Some(360));
        assert_eq!(f.memory.table_statuses()[0].status, OrderStatus::Done);
    }

    #[tokio::test]
    async fn test_intermediate_status() {
        let f = fixture();
        place(&f.memory, "4", vec![("5", 1)]).await;

        let board = f
            .console
            .update_status("4", OrderStatus::Preparing)
            .await
            .unwrap();
        assert_eq!(board.notice.as_deref(), Some("Updated to: Preparing"));
        assert_eq!(board.table("4").unwrap().status_label, "Preparing");
        assert_eq!(board.daily_total, 0);
    }

    #[tokio::test]
    async fn test_delete_line_recomputes_total() {
        let f = fixture();
        let order_id = place(&f.memory, "3", vec![("1", 2), ("2", 1)]).await;
        let lines = f.memory.orders()[0].order_items.clone();
        let youtiao = lines.iter().find(|l| l.item_id == "1").unwrap();

        let board = f
            .console
            .delete_order_item(&youtiao.id, &order_id)
            .await
            .unwrap();
        assert_eq!(board.notice.as_deref(), Some("Item deleted"));
        let orders = f.memory.orders();
        assert_eq!(orders[0].total, 520);
        assert_eq!(orders[0].total, orders[0].lines_total());
    }

    #[tokio::test]
    async fn test_delete_last_line_removes_order() {
        let f = fixture();
        let order_id = place(&f.memory, "5", vec![("6", 1)]).await;
        let line_id = f.memory.orders()[0].order_items[0].id.clone();

        f.console.delete_order_item(&line_id, &order_id).await.unwrap();
        assert!(f.memory.orders().is_empty());
    }

    #[tokio::test]
    async fn test_delete_line_recalculation_failure() {
        let f = fixture();
        let order_id = place(&f.memory, "5", vec![("6", 1), ("5", 1)]).await;
        let line_id = f.memory.orders()[0].order_items[0].id.clone();

        f.memory.fail_on(Operation::ListOrderItems);
        let board = f.console.delete_order_item(&line_id, &order_id).await.unwrap();
        assert_eq!(
            board.notice.as_deref(),
            Some("Deleted, but recalculation failed: ListOrderItems failed")
        );
    }

    #[tokio::test]
    async fn test_delete_table() {
        let f = fixture();
        place(&f.memory, "1", vec![("1", 1)]).await;
        place(&f.memory, "2", vec![("2", 1)]).await;
        f.console.fetch_board().await.unwrap();

        let board = f.console.delete_table("1").await.unwrap();
        assert_eq!(board.notice.as_deref(), Some("Table 1 deleted"));
        assert!(board.table("1").is_none());
        assert!(board.table("2").is_some());
        assert!(f.memory.orders().iter().all(|o| o.table_code != "1"));
        assert!(f.memory.table_statuses().iter().all(|t| t.table_code != "1"));
    }

    #[tokio::test]
    async fn test_delete_table_failure_restores_board() {
        let f = fixture();
        place(&f.memory, "1", vec![("1", 1)]).await;
        f.console.fetch_board().await.unwrap();
        let mut rx = f.console.subscribe();

        f.memory.fail_on(Operation::DeleteOrdersByTable);
        let board = f.console.delete_table("1").await.unwrap();
        assert_eq!(board.notice.as_deref(), Some("Delete failed: DeleteOrdersByTable failed"));
        assert!(board.table("1").is_some());

        // Optimistic removal was published before the rollback
        let optimistic = rx.recv().await.unwrap();
        assert!(optimistic.table("1").is_none());
    }

    #[tokio::test]
    async fn test_refresh_uses_latest_row_when_today_missing() {
        let f = fixture();
        f.memory.seed_daily_total("2000-01-01", 800);
        let board = f.console.refresh_daily_total().await.unwrap();
        assert_eq!(board.daily_total, 800);
        assert_eq!(board.notice.as_deref(), Some("Total refreshed"));
    }

    #[tokio::test]
    async fn test_refresh_writes_back_larger_local() {
        let f = fixture();
        let day = today_key();
        f.memory.seed_daily_total(&day, 100);
        DailyLedger::new(f.store.clone()).write(&day, 900);

        let board = f.console.refresh_daily_total().await.unwrap();
        assert_eq!(board.daily_total, 900);
        assert_eq!(f.memory.daily_total(&day), Some(900));
    }

    #[tokio::test]
    async fn test_reset_daily_total() {
        let f = fixture();
        let day = today_key();
        f.memory.seed_daily_total(&day, 5000);
        DailyLedger::new(f.store.clone()).write(&day, 5000);
        f.console.fetch_board().await.unwrap();

        let board = f.console.reset_daily_total().await.unwrap();
        assert_eq!(board.daily_total, 0);
        assert_eq!(board.notice.as_deref(), Some("Today's total reset"));
        assert_eq!(f.memory.daily_total(&day), Some(0));
        assert_eq!(DailyLedger::new(f.store.clone()).read(&day), 0);
    }

    #[test]
    fn test_toggle_expanded() {
        let f = fixture();
        assert!(f.console.toggle_expanded("3").tables.is_empty());
        assert!(f.console.inner.view.lock().expanded.contains("3"));
        f.console.toggle_expanded("3");
        assert!(!f.console.inner.view.lock().expanded.contains("3"));
    }
}
