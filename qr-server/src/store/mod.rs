//! redb-based local key-value store
//!
//! Device-local state that must survive a restart: cart contents, selected
//! table, party size, kitchen passcode and the per-day revenue total.
//!
//! # Tables
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `kv` | `&str` | raw bytes (UTF-8 string or JSON) |
//!
//! # Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `qr-order-cart` | JSON map item id → quantity |
//! | `qr-order-table` | selected table code |
//! | `qr-order-party` | party size |
//! | `qr-order-admin` | kitchen passcode |
//! | `qr-order-daily-{YYYY-MM-DD}` | accumulated total of that day |

use redb::{Database, ReadableDatabase, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::AppError;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// key = storage key, value = raw bytes
const KV_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

/// Storage keys
pub mod keys {
    pub const CART: &str = "qr-order-cart";
    pub const TABLE: &str = "qr-order-table";
    pub const PARTY: &str = "qr-order-party";
    pub const ADMIN: &str = "qr-order-admin";

    /// Per-day accumulated total
    pub fn daily(day: &str) -> String {
        format!("qr-order-daily-{day}")
    }
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Value under {0} is not valid UTF-8")]
    Encoding(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::storage(err.to_string())
    }
}

/// Local store backed by redb
#[derive(Clone)]
pub struct LocalStore {
    db: Arc<Database>,
}

impl LocalStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests, demos)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(KV_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    fn get_bytes(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(KV_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    fn set_bytes(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(KV_TABLE)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn get_string(&self, key: &str) -> StorageResult<Option<String>> {
        match self.get_bytes(key)? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| StorageError::Encoding(key.to_string())),
            None => Ok(None),
        }
    }

    pub fn set_string(&self, key: &str, value: &str) -> StorageResult<()> {
        self.set_bytes(key, value.as_bytes())
    }

    pub fn remove(&self, key: &str) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(KV_TABLE)?;
            table.remove(key)?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.get_bytes(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()> {
        let bytes = serde_json::to_vec(value)?;
        self.set_bytes(key, &bytes)
    }
}
