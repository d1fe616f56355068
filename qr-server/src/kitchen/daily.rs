//! Daily total: local ledger and reconciliation
//!
//! 显示值取 `max(本地, 后端)`；后端较小时把本地值写回后端。
//! 除了员工主动清零，今日合计只增不减。

use crate::store::{LocalStore, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
    /// Value to display
    pub total: i64,
    /// Backend is behind and must be raised to `total`
    pub write_back: bool,
}

pub fn reconcile(local: i64, remote: i64) -> Reconciled {
    Reconciled {
        total: local.max(remote),
        write_back: remote < local,
    }
}

/// Per-day totals kept in the local store (`qr-order-daily-{day}`)
#[derive(Clone)]
pub struct DailyLedger {
    store: LocalStore,
}

impl DailyLedger {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Stored total, 0 when absent or unreadable
    pub fn read(&self, day: &str) -> i64 {
        match self.store.get_string(&keys::daily(day)) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or(0),
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!(day, error = %e, "Failed to read local daily total");
                0
            }
        }
    }

    pub fn write(&self, day: &str, total: i64) {
        if let Err(e) = self.store.set_string(&keys::daily(day), &total.to_string()) {
            tracing::warn!(day, total, error = %e, "Failed to write local daily total");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_takes_max() {
        assert_eq!(
            reconcile(4000, 5000),
            Reconciled {
                total: 5000,
                write_back: false
            }
        );
        assert_eq!(
            reconcile(6360, 5000),
            Reconciled {
                total: 6360,
                write_back: true
            }
        );
        assert_eq!(
            reconcile(0, 0),
            Reconciled {
                total: 0,
                write_back: false
            }
        );
    }

    #[test]
    fn test_reconcile_never_below_either_side() {
        for (local, remote) in [(0, 7), (7, 0), (120, 119), (3, 3), (5000, 4999)] {
            let r = reconcile(local, remote);
            assert!(r.total >= local && r.total >= remote);
            assert_eq!(r.write_back, remote < local);
        }
    }

    #[test]
    fn test_ledger() {
        let store = LocalStore::open_in_memory().unwrap();
        let ledger = DailyLedger::new(store.clone());
        assert_eq!(ledger.read("2026-03-01"), 0);

        ledger.write("2026-03-01", 4000);
        assert_eq!(ledger.read("2026-03-01"), 4000);
        assert_eq!(ledger.read("2026-03-02"), 0);

        // Garbage reads as zero
        store
            .set_string(&keys::daily("2026-03-03"), "lots")
            .unwrap();
        assert_eq!(ledger.read("2026-03-03"), 0);
    }
}
