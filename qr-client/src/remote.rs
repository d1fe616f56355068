//! `Backend` over the hosted REST + realtime service

use crate::backend::{Backend, ChangeReceiver};
use crate::realtime::RealtimeClient;
use crate::rest::RestClient;
use crate::{BackendConfig, ClientError, ClientResult};
use async_trait::async_trait;
use shared::models::{
    DailyStats, MenuItem, NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, TableStatus,
    TableStatusUpdate, TableStatusUpsert,
};

const ORDER_COLUMNS: &str = "id,table_code,status,total,created_at";
const ORDER_WITH_ITEMS: &str =
    "id,table_code,status,total,created_at,order_items(id,order_id,item_id,name,price,qty)";
const ORDER_ITEM_COLUMNS: &str = "id,order_id,item_id,name,price,qty";

/// Hosted backend
#[derive(Debug)]
pub struct RestBackend {
    rest: RestClient,
    realtime: RealtimeClient,
}

impl RestBackend {
    pub fn new(config: &BackendConfig) -> ClientResult<Self> {
        Ok(Self {
            rest: RestClient::new(config)?,
            realtime: RealtimeClient::new(config),
        })
    }

    /// Stop the realtime connection
    pub fn shutdown(&self) {
        self.realtime.shutdown();
    }
}

#[async_trait]
impl Backend for RestBackend {
    async fn list_menu_items(&self) -> ClientResult<Vec<MenuItem>> {
        self.rest.from("menu_items").select("*").fetch().await
    }

    async fn upsert_table_status(&self, table_code: &str, status: OrderStatus) -> ClientResult<()> {
        let row = TableStatusUpsert {
            table_code: table_code.to_string(),
            status,
        };
        self.rest
            .from("table_status")
            .on_conflict("table_code")
            .upsert(&[row])
            .await
    }

    async fn list_table_status(&self) -> ClientResult<Vec<TableStatus>> {
        self.rest
            .from("table_status")
            .select("table_code,status,updated_at")
            .order("updated_at", false)
            .fetch()
            .await
    }

    async fn update_table_status(&self, table_code: &str, status: OrderStatus) -> ClientResult<()> {
        let patch = TableStatusUpdate {
            status,
            updated_at: chrono::Utc::now().to_rfc3339(),
        };
        self.rest
            .from("table_status")
            .eq("table_code", table_code)
            .update(&patch)
            .await
    }

    async fn delete_table_status(&self, table_code: &str) -> ClientResult<()> {
        self.rest
            .from("table_status")
            .eq("table_code", table_code)
            .delete()
            .await
    }

    async fn insert_order(&self, order: &NewOrder) -> ClientResult<Order> {
        let rows: Vec<Order> = self
            .rest
            .from("orders")
            .select(ORDER_COLUMNS)
            .insert(std::slice::from_ref(order))
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ClientError::InvalidResponse("Missing order row".to_string()))
    }

    async fn insert_order_items(&self, items: &[NewOrderItem]) -> ClientResult<()> {
        if items.is_empty() {
            return Ok(());
        }
        self.rest.from("order_items").insert_quiet(items).await
    }

    async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        self.rest
            .from("orders")
            .select(ORDER_WITH_ITEMS)
            .order("created_at", false)
            .fetch()
            .await
    }

    async fn delete_orders_by_table(&self, table_code: &str) -> ClientResult<()> {
        self.rest
            .from("orders")
            .eq("table_code", table_code)
            .delete()
            .await
    }

    async fn delete_order_item(&self, item_id: &str) -> ClientResult<()> {
        self.rest.from("order_items").eq("id", item_id).delete().await
    }

    async fn list_order_items(&self, order_id: &str) -> ClientResult<Vec<OrderItem>> {
        self.rest
            .from("order_items")
            .select(ORDER_ITEM_COLUMNS)
            .eq("order_id", order_id)
            .fetch()
            .await
    }

    async fn update_order_total(&self, order_id: &str, total: i64) -> ClientResult<()> {
        self.rest
            .from("orders")
            .eq("id", order_id)
            .update(&serde_json::json!({ "total": total }))
            .await
    }

    async fn delete_order(&self, order_id: &str) -> ClientResult<()> {
        self.rest.from("orders").eq("id", order_id).delete().await
    }

    async fn get_daily_total(&self, day: &str) -> ClientResult<Option<i64>> {
        let row: Option<DailyStats> = self
            .rest
            .from("daily_stats")
            .select("day,total")
            .eq("day", day)
            .fetch_optional()
            .await?;
        Ok(row.map(|r| r.total))
    }

    async fn latest_daily_total(&self) -> ClientResult<Option<i64>> {
        let row: Option<DailyStats> = self
            .rest
            .from("daily_stats")
            .select("day,total")
            .order("day", false)
            .fetch_optional()
            .await?;
        Ok(row.map(|r| r.total))
    }

    async fn upsert_daily_total(&self, day: &str, total: i64) -> ClientResult<()> {
        let row = DailyStats {
            day: day.to_string(),
            total,
        };
        self.rest
            .from("daily_stats")
            .on_conflict("day")
            .upsert(&[row])
            .await
    }

    async fn add_daily_total(&self, amount: i64) -> ClientResult<()> {
        self.rest
            .rpc("add_daily_total", &serde_json::json!({ "amount": amount }))
            .await
    }

    fn subscribe(&self) -> ChangeReceiver {
        self.realtime.subscribe()
    }
}
