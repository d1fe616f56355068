//! Realtime change notifications

use serde::{Deserialize, Serialize};

/// Relation a change event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Orders,
    OrderItems,
    TableStatus,
    DailyStats,
    MenuItems,
    Other,
}

impl Relation {
    pub fn from_table(table: &str) -> Self {
        match table {
            "orders" => Self::Orders,
            "order_items" => Self::OrderItems,
            "table_status" => Self::TableStatus,
            "daily_stats" => Self::DailyStats,
            "menu_items" => Self::MenuItems,
            _ => Self::Other,
        }
    }

    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::OrderItems => "order_items",
            Self::TableStatus => "table_status",
            Self::DailyStats => "daily_stats",
            Self::MenuItems => "menu_items",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

impl ChangeKind {
    /// Parse the `type` field of a postgres_changes payload
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "INSERT" => Some(Self::Insert),
            "UPDATE" => Some(Self::Update),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// 行级变更通知，仅作为重新拉取的触发信号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub relation: Relation,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(relation: Relation, kind: ChangeKind) -> Self {
        Self { relation, kind }
    }

    /// 后厨订阅的三张表
    pub fn affects_kitchen(&self) -> bool {
        matches!(
            self.relation,
            Relation::Orders | Relation::OrderItems | Relation::TableStatus
        )
    }
}
