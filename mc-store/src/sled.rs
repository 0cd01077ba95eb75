//! Sled persistent store
//!
//! Keeps every key in a single sled tree so that a batch covering the
//! pending and approved collections lands atomically.

use mc_core::error::{MetricError, MetricResult};
use mc_core::store::{KeyValueStore, StoreConfig};
use std::path::Path;
use tracing::debug;

/// Tree name
const METRICS_TREE: &str = "metric_contracts";

/// Sled-backed key-value store
#[derive(Debug, Clone)]
pub struct SledKvStore {
    db: sled::Db,
    tree: sled::Tree,
    flush_on_write: bool,
}

impl SledKvStore {
    /// Open the store described by `config`
    pub fn new(config: &StoreConfig) -> MetricResult<Self> {
        if config.data_dir.trim().is_empty() {
            return Err(MetricError::Configuration {
                reason: "sled store needs a data directory".to_string(),
            });
        }

        let db = sled::Config::new()
            .path(&config.data_dir)
            .cache_capacity(config.cache_capacity)
            .open()
            .map_err(|e| MetricError::storage("open", format!("Failed to open sled db: {}", e)))?;

        Self::from_db(db, config.flush_on_write)
    }

    /// Open or create a store at `path` with default settings
    pub fn open<P: AsRef<Path>>(path: P) -> MetricResult<Self> {
        let db = sled::open(path)
            .map_err(|e| MetricError::storage("open", format!("Failed to open sled db: {}", e)))?;
        Self::from_db(db, true)
    }

    /// Temporary store removed on drop
    pub fn temporary() -> MetricResult<Self> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .map_err(|e| MetricError::storage("open", format!("Failed to open sled db: {}", e)))?;
        Self::from_db(db, false)
    }

    fn from_db(db: sled::Db, flush_on_write: bool) -> MetricResult<Self> {
        let tree = db
            .open_tree(METRICS_TREE)
            .map_err(|e| MetricError::storage("open", format!("Failed to open metrics tree: {}", e)))?;

        debug!(tree = METRICS_TREE, keys = tree.len(), "Opened sled metric store");

        Ok(Self {
            db,
            tree,
            flush_on_write,
        })
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove every key
    pub fn clear(&self) -> MetricResult<()> {
        self.tree
            .clear()
            .map_err(|e| MetricError::storage("clear", format!("Failed to clear metrics: {}", e)))
    }

    fn decode(key: &str, bytes: &[u8]) -> MetricResult<String> {
        String::from_utf8(bytes.to_vec()).map_err(|e| MetricError::malformed(key, e))
    }
}

impl KeyValueStore for SledKvStore {
    fn get(&self, key: &str) -> MetricResult<Option<String>> {
        match self
            .tree
            .get(key.as_bytes())
            .map_err(|e| MetricError::storage("read", format!("Failed to get {}: {}", key, e)))?
        {
            Some(bytes) => Ok(Some(Self::decode(key, &bytes)?)),
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, value: String) -> MetricResult<()> {
        self.tree
            .insert(key.as_bytes(), value.into_bytes())
            .map_err(|e| MetricError::storage("write", format!("Failed to save {}: {}", key, e)))?;
        Ok(())
    }

    fn put_batch(&self, entries: Vec<(String, String)>) -> MetricResult<()> {
        let mut batch = sled::Batch::default();
        for (key, value) in entries {
            batch.insert(key.into_bytes(), value.into_bytes());
        }

        self.tree
            .apply_batch(batch)
            .map_err(|e| MetricError::storage("batch write", format!("Failed to apply batch: {}", e)))
    }

    fn flush(&self) -> MetricResult<()> {
        if !self.flush_on_write {
            return Ok(());
        }
        self.db
            .flush()
            .map_err(|e| MetricError::storage("flush", format!("Failed to flush db: {}", e)))?;
        Ok(())
    }
}
