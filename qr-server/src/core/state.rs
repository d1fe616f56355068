//! Server State
//!
//! 进程内共享状态：配置、本地存储、后端句柄、购物车、后厨面板。
//! 所有字段都可以廉价 Clone (内部为 Arc)。

use crate::cart::CartStore;
use crate::catalog::{Catalog, CatalogCache};
use crate::core::{Config, Result};
use crate::kitchen::KitchenConsole;
use crate::realtime::ChangeWatcher;
use crate::store::LocalStore;
use crate::utils::{AppError, AppResult};
use qr_client::{Backend, RestBackend};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: LocalStore,
    /// `None`: 未配置后端 (降级模式)
    pub backend: Option<Arc<dyn Backend>>,
    pub cart: CartStore,
    pub menu: CatalogCache,
    pub kitchen: KitchenConsole,
    pub shutdown: CancellationToken,
}

impl ServerState {
    /// Assemble state from already constructed parts
    pub fn new(config: Config, store: LocalStore, backend: Option<Arc<dyn Backend>>) -> Self {
        let cart = CartStore::hydrate(store.clone());
        let kitchen = KitchenConsole::new(backend.clone(), store.clone(), config.admin_code.clone());
        Self {
            config,
            store,
            backend,
            cart,
            menu: CatalogCache::default(),
            kitchen,
            shutdown: CancellationToken::new(),
        }
    }

    /// Open the local store under `work_dir` and connect the backend
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        let store = LocalStore::open(config.store_path())?;
        tracing::info!(path = %config.store_path().display(), "Local store opened");

        let backend: Option<Arc<dyn Backend>> = match &config.backend {
            Some(backend_config) => {
                tracing::info!(url = %backend_config.url, "Backend configured");
                Some(Arc::new(RestBackend::new(backend_config)?))
            }
            None => {
                tracing::warn!("Backend not configured, running in read-only mode");
                None
            }
        };

        Ok(Self::new(config.clone(), store, backend))
    }

    /// Backend handle, or 503 in degraded mode
    pub fn backend(&self) -> AppResult<&Arc<dyn Backend>> {
        self.backend
            .as_ref()
            .ok_or_else(AppError::backend_not_configured)
    }

    /// Cached menu (backend rows or built-in list)
    pub async fn catalog(&self) -> Arc<Catalog> {
        self.menu.get(self.backend.as_ref()).await
    }

    /// Reload the menu from the backend and cache it
    pub async fn refresh_catalog(&self) -> Arc<Catalog> {
        self.menu.refresh(self.backend.as_ref()).await
    }

    /// Start the realtime change watcher when a backend is configured
    pub fn start_background_tasks(&self) {
        if let Some(backend) = &self.backend {
            ChangeWatcher::new(backend.clone(), self.kitchen.clone(), self.shutdown.clone()).spawn();
        }
    }
}
