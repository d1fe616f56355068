//! Shared helpers for router-level tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use qr_client::{Backend, MemoryBackend};
use qr_server::catalog::MENU;
use qr_server::{Config, LocalStore, ServerState, build_app};
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN_CODE: &str = "2468";

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    pub backend: Option<Arc<MemoryBackend>>,
}

fn test_config() -> Config {
    let mut config = Config::with_overrides("/tmp/qr-server-test", 0);
    config.backend = None;
    config.admin_code = ADMIN_CODE.to_string();
    config.table_options = ["1", "2", "3", "4", "5"].map(String::from).to_vec();
    config.request_timeout_ms = 10_000;
    config
}

fn assemble(backend: Option<Arc<MemoryBackend>>) -> TestApp {
    let store = LocalStore::open_in_memory().expect("in-memory store");
    let dyn_backend = backend.clone().map(|b| b as Arc<dyn Backend>);
    let state = ServerState::new(test_config(), store, dyn_backend);
    let app = build_app(&state).with_state(state.clone());
    TestApp {
        app,
        state,
        backend,
    }
}

/// App wired to an in-process backend seeded with the built-in menu
pub fn with_backend() -> TestApp {
    assemble(Some(Arc::new(MemoryBackend::new().with_menu(MENU.clone()))))
}

/// App wired to an in-process backend serving `menu`
pub fn with_menu(menu: Vec<shared::models::MenuItem>) -> TestApp {
    assemble(Some(Arc::new(MemoryBackend::new().with_menu(menu))))
}

/// App without a backend (degraded mode)
pub fn degraded() -> TestApp {
    assemble(None)
}

impl TestApp {
    pub fn memory(&self) -> &MemoryBackend {
        self.backend.as_deref().expect("test app has a backend")
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn login(&self) {
        let (status, _) = self
            .post("/api/kitchen/login", serde_json::json!({ "passcode": ADMIN_CODE }))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    /// Put items in the cart and submit for `table`
    pub async fn order(&self, table: &str, lines: &[(&str, i64)]) -> String {
        for (item_id, qty) in lines {
            let (status, _) = self
                .post(
                    &format!("/api/cart/items/{item_id}/add"),
                    serde_json::json!({ "qty": qty }),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, body) = self
            .post("/api/orders", serde_json::json!({ "table_code": table }))
            .await;
        assert_eq!(status, StatusCode::OK, "checkout failed: {body}");
        body["order_id"].as_str().expect("order id").to_string()
    }
}
