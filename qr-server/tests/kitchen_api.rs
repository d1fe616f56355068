//! Kitchen console through the HTTP router: gate, board, status, deletion, daily total

mod common;

use http::{Method, StatusCode};
use qr_client::Operation;
use qr_server::store::keys;
use qr_server::utils::time::today_key;
use serde_json::json;

#[tokio::test]
async fn test_kitchen_routes_locked_until_login() {
    let app = common::with_backend();

    let (status, body) = app.get("/api/kitchen/board").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, body) = app
        .post("/api/kitchen/login", json!({ "passcode": "wrong" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    app.login().await;
    let (status, _) = app.get("/api/kitchen/board").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.send(Method::POST, "/api/kitchen/logout", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unlocked"], false);
    let (status, _) = app.get("/api/kitchen/board").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_board_groups_orders_by_table() {
    let app = common::with_backend();
    app.order("3", &[("1", 2), ("2", 1)]).await;
    app.order("3", &[("4", 1)]).await;
    app.order("5", &[("6", 1)]).await;
    app.login().await;

    let (status, board) = app.get("/api/kitchen/board").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board["order_count"], 3);

    let tables = board["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 2);
    let table3 = tables.iter().find(|t| t["table_code"] == "3").unwrap();
    assert_eq!(table3["total"], 1840);
    assert_eq!(table3["order_count"], 2);
    assert_eq!(table3["status"], "pending");
}

#[tokio::test]
async fn test_done_adds_table_total_to_larger_daily_total() {
    let app = common::with_backend();
    let today = today_key();
    app.memory().seed_daily_total(&today, 5000);
    app.state
        .store
        .set_string(&keys::daily(&today), "4000")
        .unwrap();

    app.order("3", &[("1", 2), ("2", 1)]).await;
    app.login().await;

    let (_, board) = app.get("/api/kitchen/board").await;
    assert_eq!(board["daily_total"], 5000);

    let (status, board) = app
        .send(
            Method::PUT,
            "/api/kitchen/tables/3/status",
            Some(json!({ "status": "done" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board["daily_total"], 6360);
    assert_eq!(board["notice"], "Completed (+¥1,360)");
    assert_eq!(app.memory().daily_total(&today), Some(6360));

    let table3 = &board["tables"][0];
    assert_eq!(table3["status"], "done");
}

#[tokio::test]
async fn test_status_transition_and_invalid_status() {
    let app = common::with_backend();
    app.order("2", &[("5", 1)]).await;
    app.login().await;

    let (status, board) = app
        .send(
            Method::PUT,
            "/api/kitchen/tables/2/status",
            Some(json!({ "status": "preparing" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board["notice"], "Updated to: Preparing");
    assert_eq!(board["tables"][0]["status"], "preparing");

    let (status, body) = app
        .send(
            Method::PUT,
            "/api/kitchen/tables/2/status",
            Some(json!({ "status": "cooking" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7002);
}

#[tokio::test]
async fn test_backend_failure_becomes_notice() {
    let app = common::with_backend();
    app.order("2", &[("5", 1)]).await;
    app.login().await;
    app.memory().fail_on(Operation::UpdateTableStatus);

    let (status, board) = app
        .send(
            Method::PUT,
            "/api/kitchen/tables/2/status",
            Some(json!({ "status": "preparing" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        board["notice"]
            .as_str()
            .unwrap()
            .starts_with("Update failed: ")
    );
}

#[tokio::test]
async fn test_delete_order_item_recomputes_order() {
    let app = common::with_backend();
    let order_id = app.order("1", &[("1", 2), ("2", 1)]).await;
    app.login().await;

    let items = app.memory().orders()[0].order_items.clone();
    let xiaolongbao = items.iter().find(|i| i.item_id == "2").unwrap();

    let (status, board) = app
        .send(
            Method::DELETE,
            &format!("/api/kitchen/orders/{order_id}/items/{}", xiaolongbao.id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board["notice"], "Item deleted");
    assert_eq!(app.memory().orders()[0].total, 840);

    let last = items.iter().find(|i| i.item_id == "1").unwrap();
    app.send(
        Method::DELETE,
        &format!("/api/kitchen/orders/{order_id}/items/{}", last.id),
        None,
    )
    .await;
    assert!(app.memory().orders().is_empty());
}

#[tokio::test]
async fn test_delete_table() {
    let app = common::with_backend();
    app.order("4", &[("3", 1)]).await;
    app.order("5", &[("3", 1)]).await;
    app.login().await;
    app.get("/api/kitchen/board").await;

    let (status, board) = app.send(Method::DELETE, "/api/kitchen/tables/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board["notice"], "Table 4 deleted");
    assert_eq!(board["tables"].as_array().unwrap().len(), 1);

    let remaining = app.memory().orders();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].table_code, "5");
    assert!(
        app.memory()
            .table_statuses()
            .iter()
            .all(|t| t.table_code != "4")
    );
}

#[tokio::test]
async fn test_delete_table_failure_restores_board() {
    let app = common::with_backend();
    app.order("4", &[("3", 1)]).await;
    app.login().await;
    app.get("/api/kitchen/board").await;
    app.memory().fail_on(Operation::DeleteOrdersByTable);

    let (status, board) = app.send(Method::DELETE, "/api/kitchen/tables/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(board["notice"].as_str().unwrap().starts_with("Delete failed: "));
    assert_eq!(board["tables"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_toggle_expanded() {
    let app = common::with_backend();
    app.order("1", &[("1", 1)]).await;
    app.login().await;
    app.get("/api/kitchen/board").await;

    let (_, board) = app
        .send(Method::POST, "/api/kitchen/tables/1/toggle", None)
        .await;
    assert_eq!(board["tables"][0]["expanded"], true);

    let (_, board) = app
        .send(Method::POST, "/api/kitchen/tables/1/toggle", None)
        .await;
    assert_eq!(board["tables"][0]["expanded"], false);
}

#[tokio::test]
async fn test_refresh_and_reset_daily_total() {
    let app = common::with_backend();
    let today = today_key();
    app.memory().seed_daily_total(&today, 3000);
    app.login().await;

    let (status, board) = app.get("/api/kitchen/daily-total").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board["daily_total"], 3000);
    assert_eq!(board["notice"], "Total refreshed");

    let (status, board) = app
        .send(Method::POST, "/api/kitchen/daily-total/reset", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board["daily_total"], 0);
    assert_eq!(app.memory().daily_total(&today), Some(0));
    assert_eq!(
        app.state.store.get_string(&keys::daily(&today)).unwrap(),
        Some("0".to_string())
    );
}

#[tokio::test]
async fn test_kitchen_without_backend() {
    let app = common::degraded();
    app.login().await;

    let (status, body) = app.get("/api/kitchen/board").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], 9102);
}
