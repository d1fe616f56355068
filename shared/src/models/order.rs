//! Order Model
//!
//! `orders` 与 `order_items` 两张表。订单明细是下单时菜品名称/价格的快照，
//! 之后菜单变化不影响历史订单。

use super::serde_helpers::string_or_number;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 订单 / 桌台状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Done,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Done => "done",
        }
    }

    /// 后厨界面展示文案
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Preparing => "Preparing",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown order status string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "done" => Ok(Self::Done),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// 订单 (含嵌套明细)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub table_code: String,
    pub status: OrderStatus,
    pub total: i64,
    pub created_at: String,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

impl Order {
    /// 明细合计 (price × qty)
    pub fn lines_total(&self) -> i64 {
        lines_total(&self.order_items)
    }
}

/// 订单明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub order_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub item_id: String,
    pub name: String,
    pub price: i64,
    pub qty: i64,
}

impl OrderItem {
    pub fn subtotal(&self) -> i64 {
        self.price.saturating_mul(self.qty)
    }
}

/// Σ price × qty
pub fn lines_total(items: &[OrderItem]) -> i64 {
    items
        .iter()
        .fold(0i64, |acc, item| acc.saturating_add(item.subtotal()))
}

/// Insert payload for `orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub table_code: String,
    pub status: OrderStatus,
    pub total: i64,
}

/// Insert payload for `order_items`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub order_id: String,
    pub item_id: String,
    pub name: String,
    pub price: i64,
    pub qty: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, price: i64, qty: i64) -> OrderItem {
        OrderItem {
            id: id.into(),
            order_id: "o1".into(),
            item_id: id.into(),
            name: format!("item {id}"),
            price,
            qty,
        }
    }

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!("preparing".parse::<OrderStatus>(), Ok(OrderStatus::Preparing));
        assert!("cooking".parse::<OrderStatus>().is_err());
        assert_eq!(OrderStatus::Done.to_string(), "done");
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
    }

    #[test]
    fn test_lines_total() {
        let order = Order {
            id: "o1".into(),
            table_code: "3".into(),
            status: OrderStatus::Pending,
            total: 1360,
            created_at: "2026-01-01T00:00:00+00:00".into(),
            order_items: vec![line("1", 420, 2), line("2", 520, 1)],
        };
        assert_eq!(order.lines_total(), 1360);
        assert_eq!(order.lines_total(), order.total);
    }

    #[test]
    fn test_order_without_embedded_items() {
        let json = r#"{"id":"o1","table_code":"2","status":"done","total":0,"created_at":"x"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert!(order.order_items.is_empty());
        assert_eq!(order.status, OrderStatus::Done);
    }

    #[test]
    fn test_order_with_numeric_ids() {
        let json = r#"[{"id":17,"table_code":"3","status":"pending","total":1360,"created_at":"x",
            "order_items":[{"id":5,"order_id":17,"item_id":1,"name":"Youtiao","price":420,"qty":2},
                           {"id":6,"order_id":17,"item_id":"2","name":"Xiaolongbao","price":520,"qty":1}]}]"#;
        let orders: Vec<Order> = serde_json::from_str(json).unwrap();
        assert_eq!(orders[0].id, "17");
        assert_eq!(orders[0].order_items[0].id, "5");
        assert_eq!(orders[0].order_items[0].order_id, "17");
        assert_eq!(orders[0].order_items[0].item_id, "1");
        assert_eq!(orders[0].order_items[1].item_id, "2");
        assert_eq!(orders[0].lines_total(), 1360);
    }
}
