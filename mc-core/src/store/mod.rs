//! Persistence layer
//!
//! The lifecycle state lives in a small text key-value store:
//!
//! | Key | Value |
//! |-----|-------|
//! | `pendingMetrics` | JSON array of pending [`MetricRecord`](crate::types::MetricRecord)s |
//! | `approvedMetrics` | JSON array of approved records |
//! | `datasetColumns` | JSON array of column names |
//!
//! Backends implement [`KeyValueStore`]; the [`MetricPersistence`] adapter
//! owns encoding, decoding and load-time reconciliation. Both record
//! collections are always written together through
//! [`KeyValueStore::put_batch`], which backends must apply atomically.

pub mod adapter;
pub mod memory;

use crate::error::MetricResult;

/// Key holding the pending collection
pub const PENDING_KEY: &str = "pendingMetrics";
/// Key holding the approved collection
pub const APPROVED_KEY: &str = "approvedMetrics";
/// Key holding the dataset column registry
pub const COLUMNS_KEY: &str = "datasetColumns";

/// Durable text key-value store
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key was never written
    fn get(&self, key: &str) -> MetricResult<Option<String>>;

    /// Overwrite a single value
    fn put(&self, key: &str, value: String) -> MetricResult<()>;

    /// Overwrite several values as one atomic write
    fn put_batch(&self, entries: Vec<(String, String)>) -> MetricResult<()>;

    /// Push buffered writes to durable media
    fn flush(&self) -> MetricResult<()> {
        Ok(())
    }
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Data directory
    pub data_dir: String,
    /// Page cache size in bytes
    pub cache_capacity: u64,
    /// Flush to disk after every write
    pub flush_on_write: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: "./metric_data".to_string(),
            cache_capacity: 16 * 1024 * 1024, // 16MB
            flush_on_write: true,
        }
    }
}

impl StoreConfig {
    /// Configuration rooted at the given directory
    pub fn at(data_dir: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Small cache, no forced flushes
    pub fn test() -> Self {
        Self {
            data_dir: String::new(),
            cache_capacity: 1024 * 1024, // 1MB
            flush_on_write: false,
        }
    }
}

pub use adapter::{reconcile, LoadReport, MetricPersistence, PersistedState};
pub use memory::MemoryKvStore;
