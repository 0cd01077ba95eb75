//! In-memory key-value store
//!
//! Used for tests and for sessions that do not need to survive a restart.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::KeyValueStore;
use crate::error::{MetricError, MetricResult};

/// In-memory store
///
/// Clones share the same underlying map, so a test can keep a handle and
/// inspect what a manager wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with raw values
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every key
    pub fn clear(&self) -> MetricResult<()> {
        self.entries
            .write()
            .map_err(|e| MetricError::storage("clear", e))?
            .clear();
        Ok(())
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> MetricResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| MetricError::storage("read", e))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: String) -> MetricResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| MetricError::storage("write", e))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn put_batch(&self, batch: Vec<(String, String)>) -> MetricResult<()> {
        // One write guard covers the whole batch
        let mut entries = self
            .entries
            .write()
            .map_err(|e| MetricError::storage("batch write", e))?;
        entries.extend(batch);
        Ok(())
    }
}
