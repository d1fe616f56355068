//! Kitchen board view data

use serde::Serialize;
use shared::format_jpy;
use shared::models::{Order, OrderStatus, TableStatus};
use std::collections::HashSet;

/// One table on the board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCard {
    pub table_code: String,
    pub status: OrderStatus,
    pub status_label: &'static str,
    pub updated_at: Option<String>,
    /// Orders of this table, newest first
    pub orders: Vec<Order>,
    /// Σ order totals
    pub total: i64,
    pub order_count: usize,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KitchenBoard {
    pub tables: Vec<TableCard>,
    pub order_count: usize,
    /// Number of order lines across all orders
    pub item_count: usize,
    pub daily_total: i64,
    pub daily_total_label: String,
    pub notice: Option<String>,
}

impl KitchenBoard {
    /// Group orders under their table's status row
    ///
    /// Tables keep the order of `tables` (most recently updated first).
    /// Orders whose table has no status row are counted but not shown.
    pub fn build(
        orders: &[Order],
        tables: &[TableStatus],
        expanded: &HashSet<String>,
        daily_total: i64,
        notice: Option<String>,
    ) -> Self {
        let cards = tables
            .iter()
            .map(|table| {
                let table_orders: Vec<Order> = orders
                    .iter()
                    .filter(|o| o.table_code == table.table_code)
                    .cloned()
                    .collect();
                TableCard {
                    table_code: table.table_code.clone(),
                    status: table.status,
                    status_label: table.status.label(),
                    updated_at: table.updated_at.clone(),
                    total: table_orders.iter().map(|o| o.total).sum(),
                    order_count: table_orders.len(),
                    orders: table_orders,
                    expanded: expanded.contains(&table.table_code),
                }
            })
            .collect();

        Self {
            tables: cards,
            order_count: orders.len(),
            item_count: orders.iter().map(|o| o.order_items.len()).sum(),
            daily_total,
            daily_total_label: format_jpy(daily_total),
            notice,
        }
    }

    pub fn table(&self, table_code: &str) -> Option<&TableCard> {
        self.tables.iter().find(|t| t.table_code == table_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::OrderItem;

    fn order(id: &str, table: &str, total: i64, lines: usize) -> Order {
        Order {
            id: id.into(),
            table_code: table.into(),
            status: OrderStatus::Pending,
            total,
            created_at: "2026-03-01T10:00:00+00:00".into(),
            order_items: (0..lines)
                .map(|n| OrderItem {
                    id: format!("{id}-{n}"),
                    order_id: id.into(),
                    item_id: "1".into(),
                    name: "Youtiao".into(),
                    price: 420,
                    qty: 1,
                })
                .collect(),
        }
    }

    fn status(table: &str, status: OrderStatus) -> TableStatus {
        TableStatus {
            table_code: table.into(),
            status,
            updated_at: None,
        }
    }

    #[test]
    fn test_groups_orders_by_table() {
        let orders = vec![
            order("o3", "3", 520, 1),
            order("o2", "1", 420, 1),
            order("o1", "3", 840, 2),
        ];
        let tables = vec![
            status("3", OrderStatus::Preparing),
            status("1", OrderStatus::Pending),
        ];
        let mut expanded = HashSet::new();
        expanded.insert("1".to_string());

        let board = KitchenBoard::build(&orders, &tables, &expanded, 6360, None);
        assert_eq!(board.order_count, 3);
        assert_eq!(board.item_count, 4);
        assert_eq!(board.daily_total_label, "¥6,360");

        let three = &board.tables[0];
        assert_eq!(three.table_code, "3");
        assert_eq!(three.status_label, "Preparing");
        assert_eq!(three.total, 1360);
        assert_eq!(three.order_count, 2);
        assert!(!three.expanded);

        let one = board.table("1").unwrap();
        assert_eq!(one.total, 420);
        assert!(one.expanded);
    }

    #[test]
    fn test_orders_without_status_row_are_hidden() {
        let orders = vec![order("o1", "9", 100, 1)];
        let board = KitchenBoard::build(&orders, &[], &HashSet::new(), 0, None);
        assert!(board.tables.is_empty());
        assert_eq!(board.order_count, 1);
    }
}
