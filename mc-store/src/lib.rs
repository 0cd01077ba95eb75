//! Metric Contract Storage
//!
//! Durable [`KeyValueStore`](mc_core::KeyValueStore) backend for the metric
//! lifecycle, built on the sled embedded database.
//!
//! # Design
//!
//! - One sled tree holds every key, so the batch that rewrites the pending
//!   and approved collections is applied atomically
//! - Values are stored as UTF-8 JSON text, the same layout the in-memory
//!   store uses
//! - Writes are flushed to disk unless `flush_on_write` is disabled

pub mod sled;

pub use self::sled::SledKvStore;

use mc_core::{MetricLifecycleManager, MetricResult, StoreConfig};
use std::sync::Arc;

/// Open the sled store described by `config` and load a manager from it
pub fn open_manager(config: &StoreConfig) -> MetricResult<MetricLifecycleManager<SledKvStore>> {
    let store = SledKvStore::new(config)?;
    Ok(MetricLifecycleManager::load(Arc::new(store)))
}
