//! ChangeWatcher - refetch the kitchen board on backend row changes
//!
//! Any change on `orders`, `order_items` or `table_status` triggers a full
//! board refetch while the kitchen console is unlocked. The refreshed board
//! reaches kitchen clients through [`KitchenConsole::subscribe`].

use crate::kitchen::KitchenConsole;
use qr_client::Backend;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub struct ChangeWatcher {
    backend: Arc<dyn Backend>,
    kitchen: KitchenConsole,
    shutdown: CancellationToken,
}

impl ChangeWatcher {
    pub fn new(
        backend: Arc<dyn Backend>,
        kitchen: KitchenConsole,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            backend,
            kitchen,
            shutdown,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(self) {
        tracing::info!("Change watcher started");
        let mut rx = self.backend.subscribe();

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,

                result = rx.recv() => {
                    match result {
                        Ok(event) => {
                            if event.affects_kitchen() {
                                self.refetch(&format!("{:?}/{:?}", event.relation, event.kind)).await;
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            tracing::warn!("Change watcher lagged {n} events, refetching");
                            self.refetch("lagged").await;
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            tracing::info!("Change feed closed");
                            break;
                        }
                    }
                }
            }
        }

        tracing::info!("Change watcher stopped");
    }

    async fn refetch(&self, reason: &str) {
        if !self.kitchen.is_unlocked() {
            return;
        }
        tracing::debug!(reason, "Refetching kitchen board");
        if let Err(e) = self.kitchen.fetch_board().await {
            tracing::warn!(error = %e, "Realtime refetch failed");
        }
    }
}
