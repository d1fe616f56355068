//! RealtimeClient - row change feed over the backend's websocket
//!
//! 1. Connect to `{url}/realtime/v1/websocket`
//! 2. Join channel `orders-realtime` with postgres_changes filters
//! 3. Heartbeat every 30s
//! 4. Forward each change as a [`ChangeEvent`] on a broadcast channel
//! 5. Reconnect with exponential backoff on disconnect

use crate::{BackendConfig, ClientError, ClientResult};
use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use shared::models::{ChangeEvent, ChangeKind, Relation};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::broadcast;
use tokio::time::Duration;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

/// Channel topic joined on connect
pub const CHANNEL_TOPIC: &str = "realtime:orders-realtime";
/// Tables whose changes are forwarded
pub const WATCHED_TABLES: [&str; 3] = ["orders", "order_items", "table_status"];

const HEARTBEAT_INTERVAL_SECS: u64 = 30;
const INITIAL_RETRY_DELAY_SECS: u64 = 5;
const MAX_RECONNECT_DELAY_SECS: u64 = 120;
const EVENT_CAPACITY: usize = 256;

/// 实时变更订阅客户端
///
/// 首次 [`subscribe`](Self::subscribe) 时在后台启动连接任务，多个订阅者共享
/// 同一条 websocket。
#[derive(Debug)]
pub struct RealtimeClient {
    ws_url: String,
    api_key: String,
    tx: broadcast::Sender<ChangeEvent>,
    started: AtomicBool,
    shutdown: CancellationToken,
}

impl RealtimeClient {
    pub fn new(config: &BackendConfig) -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            ws_url: websocket_url(&config.url, &config.anon_key),
            api_key: config.anon_key.clone(),
            tx,
            started: AtomicBool::new(false),
            shutdown: CancellationToken::new(),
        }
    }

    /// Subscribe to change events, starting the connection on first use
    ///
    /// Must be called from within a tokio runtime.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        let rx = self.tx.subscribe();
        if !self.started.swap(true, Ordering::SeqCst) {
            let session = Session {
                ws_url: self.ws_url.clone(),
                api_key: self.api_key.clone(),
                tx: self.tx.clone(),
                refs: AtomicU64::new(0),
            };
            tokio::spawn(session.run(self.shutdown.clone()));
        }
        rx
    }

    /// Stop the background connection
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

impl Drop for RealtimeClient {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Build the websocket URL from the project URL
pub fn websocket_url(base_url: &str, api_key: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let ws_base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        base.to_string()
    };
    format!("{ws_base}/realtime/v1/websocket?apikey={api_key}&vsn=1.0.0")
}

/// `phx_join` message subscribing to all events on the watched tables
pub fn join_message(api_key: &str, msg_ref: u64) -> Value {
    let changes: Vec<Value> = WATCHED_TABLES
        .iter()
        .map(|table| json!({ "event": "*", "schema": "public", "table": table }))
        .collect();

    json!({
        "topic": CHANNEL_TOPIC,
        "event": "phx_join",
        "payload": {
            "config": {
                "broadcast": { "self": false },
                "presence": { "key": "" },
                "postgres_changes": changes,
            },
            "access_token": api_key,
        },
        "ref": msg_ref.to_string(),
        "join_ref": msg_ref.to_string(),
    })
}

fn heartbeat_message(msg_ref: u64) -> Value {
    json!({
        "topic": "phoenix",
        "event": "heartbeat",
        "payload": {},
        "ref": msg_ref.to_string(),
    })
}

/// Extract a change event from an incoming frame
///
/// Returns `None` for replies, heartbeats, presence and anything not a row change.
pub fn parse_change(text: &str) -> Option<ChangeEvent> {
    let frame: Value = serde_json::from_str(text).ok()?;
    if frame.get("event")?.as_str()? != "postgres_changes" {
        return None;
    }
    let data = frame.get("payload")?.get("data")?;
    let relation = Relation::from_table(data.get("table")?.as_str()?);
    let kind = ChangeKind::parse(data.get("type")?.as_str()?)?;
    Some(ChangeEvent::new(relation, kind))
}

/// Phoenix reply with non-ok status (e.g. join rejected)
fn parse_error_reply(text: &str) -> Option<String> {
    let frame: Value = serde_json::from_str(text).ok()?;
    if frame.get("event")?.as_str()? != "phx_reply" {
        return None;
    }
    let payload = frame.get("payload")?;
    match payload.get("status")?.as_str()? {
        "ok" => None,
        status => Some(
            payload
                .get("response")
                .map(|r| r.to_string())
                .unwrap_or_else(|| status.to_string()),
        ),
    }
}

struct Session {
    ws_url: String,
    api_key: String,
    tx: broadcast::Sender<ChangeEvent>,
    refs: AtomicU64,
}

impl Session {
    fn next_ref(&self) -> u64 {
        self.refs.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Main run loop: connect, stream changes, reconnect on failure
    async fn run(self, shutdown: CancellationToken) {
        tracing::info!("Realtime subscription started");
        let mut reconnect_delay = Duration::from_secs(INITIAL_RETRY_DELAY_SECS);

        loop {
            if shutdown.is_cancelled() {
                break;
            }

            match self.run_session(&shutdown).await {
                Ok(true) => {
                    // Session was healthy, start backoff from scratch
                    reconnect_delay = Duration::from_secs(INITIAL_RETRY_DELAY_SECS);
                }
                Ok(false) => break,
                Err(e) => {
                    tracing::warn!(
                        delay_secs = reconnect_delay.as_secs(),
                        "Realtime connection lost: {e}"
                    );
                }
            }

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(reconnect_delay) => {},
            }
            reconnect_delay =
                (reconnect_delay * 2).min(Duration::from_secs(MAX_RECONNECT_DELAY_SECS));
        }

        tracing::info!("Realtime subscription stopped");
    }

    /// Run one websocket session
    ///
    /// `Ok(false)` means shutdown was requested, `Ok(true)` a clean disconnect.
    async fn run_session(&self, shutdown: &CancellationToken) -> ClientResult<bool> {
        let (ws, _) = tokio_tungstenite::connect_async(self.ws_url.as_str())
            .await
            .map_err(|e| ClientError::Realtime(e.to_string()))?;
        let (mut sink, mut stream) = ws.split();

        let join = join_message(&self.api_key, self.next_ref());
        sink.send(Message::Text(join.to_string().into()))
            .await
            .map_err(|e| ClientError::Realtime(e.to_string()))?;
        tracing::info!(topic = CHANNEL_TOPIC, "Realtime channel joined");

        let mut heartbeat = tokio::time::interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS));
        heartbeat.tick().await; // skip immediate tick

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    let _ = sink.close().await;
                    return Ok(false);
                }

                _ = heartbeat.tick() => {
                    let msg = heartbeat_message(self.next_ref());
                    sink.send(Message::Text(msg.to_string().into()))
                        .await
                        .map_err(|e| ClientError::Realtime(e.to_string()))?;
                }

                msg = stream.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            if let Some(event) = parse_change(&text) {
                                tracing::debug!(?event, "Realtime change received");
                                // No receivers is fine
                                let _ = self.tx.send(event);
                            } else if let Some(reason) = parse_error_reply(&text) {
                                return Err(ClientError::Realtime(reason));
                            }
                        }
                        Some(Ok(Message::Ping(data))) => {
                            let _ = sink.send(Message::Pong(data)).await;
                        }
                        Some(Ok(Message::Close(_))) => {
                            tracing::info!("Realtime socket closed by server");
                            return Ok(true);
                        }
                        Some(Err(e)) => return Err(ClientError::Realtime(e.to_string())),
                        None => return Ok(true),
                        _ => {} // Binary, Pong
                    }
                }
            }
        }
    }
}
