//! Catalog - menu loading, category filter and keyword search
//!
//! The menu comes from the backend's `menu_items` relation when a backend is
//! configured and the read succeeds; otherwise from the built-in [`MENU`].
//! [`CatalogCache`] keeps the last good menu so cart and checkout requests
//! don't hit the backend each time.

mod menu;

pub use menu::MENU;

use parking_lot::RwLock;
use qr_client::Backend;
use serde::Serialize;
use shared::models::{CategoryKey, MenuItem};
use std::sync::Arc;

/// Message shown when a browse view has no results
pub const NO_MATCH_MESSAGE: &str = "No matching dishes";

/// Where the menu rows came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuSource {
    Local,
    Remote,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<MenuItem>,
    source: MenuSource,
}

impl Catalog {
    /// Built-in menu
    pub fn builtin() -> Self {
        Self {
            items: MENU.clone(),
            source: MenuSource::Local,
        }
    }

    /// Load the menu, falling back to the built-in one on any failure
    pub async fn load(backend: Option<&Arc<dyn Backend>>) -> Self {
        let Some(backend) = backend else {
            return Self::builtin();
        };

        match backend.list_menu_items().await {
            Ok(items) => Self {
                items,
                source: MenuSource::Remote,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load menu_items, using built-in menu");
                Self::builtin()
            }
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn source(&self) -> MenuSource {
        self.source
    }

    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items of one category, narrowed by keyword
    pub fn browse(&self, cat: CategoryKey, query: &str) -> Vec<&MenuItem> {
        filter(&self.items, cat, query)
    }
}

/// Process-wide menu cache
///
/// Filled on first use and reloaded by [`CatalogCache::refresh`] (the menu
/// page). A built-in fallback caused by a failed backend read is never cached,
/// so the next request tries the backend again.
#[derive(Clone, Default)]
pub struct CatalogCache {
    current: Arc<RwLock<Option<Arc<Catalog>>>>,
}

impl CatalogCache {
    /// Cached menu, loading it when empty
    pub async fn get(&self, backend: Option<&Arc<dyn Backend>>) -> Arc<Catalog> {
        let cached = self.current.read().clone();
        match cached {
            Some(catalog) => catalog,
            None => self.refresh(backend).await,
        }
    }

    /// Reload from the backend
    pub async fn refresh(&self, backend: Option<&Arc<dyn Backend>>) -> Arc<Catalog> {
        let catalog = Arc::new(Catalog::load(backend).await);
        if backend.is_none() || catalog.source() == MenuSource::Remote {
            *self.current.write() = Some(catalog.clone());
        }
        catalog
    }
}

/// Category match, then case-insensitive substring match on name or description
///
/// A blank keyword matches everything in the category.
pub fn filter<'a>(items: &'a [MenuItem], cat: CategoryKey, query: &str) -> Vec<&'a MenuItem> {
    let keyword = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| item.cat == cat)
        .filter(|item| keyword.is_empty() || item.matches_keyword(&keyword))
        .collect()
}

/// Resolve the `cat` query parameter; unknown or missing falls back to the first category
pub fn resolve_category(cat: Option<&str>) -> CategoryKey {
    cat.and_then(CategoryKey::parse)
        .unwrap_or(shared::models::CATEGORIES[0].key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qr_client::MemoryBackend;

    #[test]
    fn test_builtin_menu() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.items().len(), 6);
        assert_eq!(catalog.source(), MenuSource::Local);
        assert_eq!(catalog.find("2").map(|i| i.price), Some(520));
        assert!(catalog.find("99").is_none());
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = Catalog::builtin();
        let chinese = catalog.browse(CategoryKey::Chinese, "");
        let names: Vec<&str> = chinese.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Youtiao", "Xiaolongbao"]);
    }

    #[test]
    fn test_search_matches_description() {
        let catalog = Catalog::builtin();
        // Keyword only present in the description
        let hits = catalog.browse(CategoryKey::Coffee, "  MILKY ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Latte");

        assert_eq!(catalog.browse(CategoryKey::Coffee, "latte").len(), 1);
        assert!(catalog.browse(CategoryKey::Coffee, "matcha").is_empty());
        // Search stays inside the selected category
        assert!(catalog.browse(CategoryKey::Drink, "latte").is_empty());
    }

    #[test]
    fn test_resolve_category() {
        assert_eq!(resolve_category(Some("snack")), CategoryKey::Snack);
        assert_eq!(resolve_category(Some("pizza")), CategoryKey::Western);
        assert_eq!(resolve_category(None), CategoryKey::Western);
    }

    #[tokio::test]
    async fn test_load_prefers_backend_rows() {
        let row = MENU[3].clone();
        let backend: Arc<dyn Backend> = Arc::new(MemoryBackend::new().with_menu(vec![row]));
        let catalog = Catalog::load(Some(&backend)).await;
        assert_eq!(catalog.source(), MenuSource::Remote);
        assert_eq!(catalog.items().len(), 1);
    }

    #[tokio::test]
    async fn test_load_falls_back_on_error() {
        let memory = MemoryBackend::new();
        memory.fail_on(qr_client::Operation::ListMenuItems);
        let backend: Arc<dyn Backend> = Arc::new(memory);
        let catalog = Catalog::load(Some(&backend)).await;
        assert_eq!(catalog.source(), MenuSource::Local);
        assert_eq!(catalog.items().len(), 6);

        let catalog = Catalog::load(None).await;
        assert_eq!(catalog.source(), MenuSource::Local);
    }

    #[tokio::test]
    async fn test_cache_reuses_loaded_menu() {
        let memory = Arc::new(MemoryBackend::new().with_menu(vec![MENU[3].clone()]));
        let backend: Arc<dyn Backend> = memory.clone();
        let cache = CatalogCache::default();

        assert_eq!(cache.get(Some(&backend)).await.items().len(), 1);

        // Served from the cache, the backend is not read again
        memory.fail_on(qr_client::Operation::ListMenuItems);
        let catalog = cache.get(Some(&backend)).await;
        assert_eq!(catalog.source(), MenuSource::Remote);
        assert_eq!(catalog.items().len(), 1);

        // Failed reload answers with the built-in menu but keeps the cached one
        let reloaded = cache.refresh(Some(&backend)).await;
        assert_eq!(reloaded.source(), MenuSource::Local);
        assert_eq!(cache.get(Some(&backend)).await.source(), MenuSource::Remote);
    }

    #[tokio::test]
    async fn test_cache_skips_failed_first_load() {
        let memory = Arc::new(MemoryBackend::new().with_menu(vec![MENU[0].clone()]));
        memory.fail_on(qr_client::Operation::ListMenuItems);
        let backend: Arc<dyn Backend> = memory.clone();
        let cache = CatalogCache::default();

        assert_eq!(cache.get(Some(&backend)).await.source(), MenuSource::Local);

        memory.clear_failure(qr_client::Operation::ListMenuItems);
        let catalog = cache.get(Some(&backend)).await;
        assert_eq!(catalog.source(), MenuSource::Remote);
        assert_eq!(catalog.items().len(), 1);
    }
}
