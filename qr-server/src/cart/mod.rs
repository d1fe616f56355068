//! Cart Store
//!
//! 本机购物车：item id → 数量，每次变更后写入本地存储，启动时从本地存储恢复。
//! 数量 ≤ 0 的条目直接删除，不会以 0 或负数保存。

use crate::store::{LocalStore, keys};
use crate::utils::validation::MAX_QTY;
use parking_lot::Mutex;
use serde::Serialize;
use shared::models::MenuItem;
use std::collections::BTreeMap;
use std::sync::Arc;

pub type CartEntries = BTreeMap<String, i64>;

#[derive(Clone)]
pub struct CartStore {
    store: LocalStore,
    entries: Arc<Mutex<CartEntries>>,
}

impl CartStore {
    /// Restore the cart from the local store
    ///
    /// A missing or unreadable value yields an empty cart; entries outside
    /// `1..=MAX_QTY` are dropped.
    pub fn hydrate(store: LocalStore) -> Self {
        let entries = match store.get_json::<CartEntries>(keys::CART) {
            Ok(Some(entries)) => entries
                .into_iter()
                .filter(|(id, qty)| {
                    let valid = (1..=MAX_QTY).contains(qty);
                    if !valid {
                        tracing::warn!(item_id = %id, qty, "Dropping stored cart entry out of range");
                    }
                    valid
                })
                .collect(),
            Ok(None) => CartEntries::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored cart is unreadable, starting empty");
                CartEntries::new()
            }
        };

        Self {
            store,
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    /// Increase quantity (default step 1)
    pub fn add(&self, item_id: &str, qty: i64) -> CartEntries {
        self.mutate(|entries| {
            let next = entries.get(item_id).copied().unwrap_or(0).saturating_add(qty);
            put(entries, item_id, next);
        })
    }

    /// Decrease quantity; reaching zero removes the entry
    pub fn sub(&self, item_id: &str, qty: i64) -> CartEntries {
        self.mutate(|entries| {
            let next = entries.get(item_id).copied().unwrap_or(0).saturating_sub(qty);
            put(entries, item_id, next);
        })
    }

    pub fn set_qty(&self, item_id: &str, qty: i64) -> CartEntries {
        self.mutate(|entries| put(entries, item_id, qty))
    }

    pub fn clear(&self) -> CartEntries {
        self.mutate(|entries| entries.clear())
    }

    pub fn items(&self) -> CartEntries {
        self.entries.lock().clone()
    }

    /// Total number of units in the cart
    pub fn count(&self) -> i64 {
        units(&self.entries.lock())
    }

    pub fn qty_of(&self, item_id: &str) -> i64 {
        self.entries.lock().get(item_id).copied().unwrap_or(0)
    }

    /// Join cart entries with the menu
    pub fn priced(&self, menu: &[MenuItem]) -> CartView {
        CartView::build(&self.items(), menu)
    }

    fn mutate(&self, f: impl FnOnce(&mut CartEntries)) -> CartEntries {
        let snapshot = {
            let mut entries = self.entries.lock();
            f(&mut entries);
            entries.clone()
        };
        // Write failures leave the in-memory cart authoritative
        if let Err(e) = self.store.set_json(keys::CART, &snapshot) {
            tracing::warn!(error = %e, "Failed to persist cart");
        }
        snapshot
    }
}

/// Store `qty` capped at `MAX_QTY`; ≤ 0 removes
fn put(entries: &mut CartEntries, item_id: &str, qty: i64) {
    if qty <= 0 {
        entries.remove(item_id);
    } else {
        entries.insert(item_id.to_string(), qty.min(MAX_QTY));
    }
}

fn units(entries: &CartEntries) -> i64 {
    entries.values().fold(0i64, |acc, qty| acc.saturating_add(*qty))
}

/// One cart line
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub item_id: String,
    pub qty: i64,
    /// `None` when the item is no longer on the menu
    pub item: Option<MenuItem>,
    pub subtotal: i64,
    pub available: bool,
}

/// Cart view data
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub count: i64,
    /// Σ price × qty over available lines
    pub total: i64,
}

impl CartView {
    pub fn build(entries: &CartEntries, menu: &[MenuItem]) -> Self {
        let lines: Vec<CartLine> = entries
            .iter()
            .map(|(id, qty)| {
                let item = menu.iter().find(|m| &m.id == id).cloned();
                let subtotal = item
                    .as_ref()
                    .map(|m| m.price.saturating_mul(*qty))
                    .unwrap_or(0);
                CartLine {
                    item_id: id.clone(),
                    qty: *qty,
                    available: item.is_some(),
                    item,
                    subtotal,
                }
            })
            .collect();

        Self {
            count: units(entries),
            total: lines
                .iter()
                .fold(0i64, |acc, l| acc.saturating_add(l.subtotal)),
            lines,
        }
    }

    /// (item, qty) pairs that can be ordered
    pub fn orderable(&self) -> Vec<(MenuItem, i64)> {
        self.lines
            .iter()
            .filter_map(|line| line.item.clone().map(|item| (item, line.qty)))
            .collect()
    }
}
