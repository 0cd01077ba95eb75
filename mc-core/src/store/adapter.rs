//! Persistence adapter
//!
//! Turns lifecycle collections into stored text and back. Loading never
//! fails: absent keys yield empty collections, and unreadable or malformed
//! values are replaced by empty collections with a warning in the
//! [`LoadReport`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

use super::{KeyValueStore, APPROVED_KEY, COLUMNS_KEY, PENDING_KEY};
use crate::error::{MetricError, MetricResult};
use crate::types::{MetricId, MetricRecord};

/// Outcome of a load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Keys that could not be read or decoded
    pub warnings: Vec<MetricError>,
    /// Duplicate records discarded during reconciliation
    pub duplicates_dropped: usize,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.duplicates_dropped == 0
    }
}

/// State read back from the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub pending: Vec<MetricRecord>,
    pub approved: Vec<MetricRecord>,
    pub columns: Vec<String>,
    pub report: LoadReport,
}

/// Persistence adapter over a [`KeyValueStore`]
#[derive(Debug)]
pub struct MetricPersistence<S: KeyValueStore> {
    store: Arc<S>,
}

impl<S: KeyValueStore> Clone for MetricPersistence<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> MetricPersistence<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Load and reconcile everything the store holds
    pub fn load(&self) -> PersistedState {
        let mut report = LoadReport::default();

        let pending = self.read_records(PENDING_KEY, &mut report);
        let approved = self.read_records(APPROVED_KEY, &mut report);
        let columns: Vec<String> = self.read_key(COLUMNS_KEY, &mut report);

        let (pending, approved, dropped) = reconcile(pending, approved);
        report.duplicates_dropped = dropped;

        if dropped > 0 {
            warn!(count = dropped, "Dropped duplicate metric records while loading");
        }
        debug!(
            pending = pending.len(),
            approved = approved.len(),
            columns = columns.len(),
            "Loaded persisted metric state"
        );

        PersistedState {
            pending,
            approved,
            columns,
            report,
        }
    }

    /// Write both collections in a single atomic batch
    pub fn save_collections(
        &self,
        pending: &[MetricRecord],
        approved: &[MetricRecord],
    ) -> MetricResult<()> {
        let batch = vec![
            (PENDING_KEY.to_string(), Self::encode(&pending)?),
            (APPROVED_KEY.to_string(), Self::encode(&approved)?),
        ];
        self.store.put_batch(batch)?;
        self.store.flush()
    }

    /// Overwrite the dataset column registry
    pub fn save_columns(&self, columns: &[String]) -> MetricResult<()> {
        self.store.put(COLUMNS_KEY, Self::encode(&columns)?)?;
        self.store.flush()
    }

    // ==================== Helpers ====================

    fn encode<T: Serialize + ?Sized>(value: &T) -> MetricResult<String> {
        serde_json::to_string(value).map_err(MetricError::from)
    }

    /// Decode a record collection one entry at a time, skipping entries that
    /// do not decode
    fn read_records(&self, key: &str, report: &mut LoadReport) -> Vec<MetricRecord> {
        let entries: Vec<serde_json::Value> = self.read_key(key, report);
        let mut records = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value(entry) {
                Ok(record) => records.push(record),
                Err(e) => {
                    let err = MetricError::malformed(format!("{}[{}]", key, index), e);
                    warn!(key = key, index = index, error = %err, "Skipping malformed metric record");
                    report.warnings.push(err);
                }
            }
        }

        records
    }

    fn read_key<T: DeserializeOwned + Default>(&self, key: &str, report: &mut LoadReport) -> T {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                warn!(key = key, error = %e, "Failed to read persisted metrics, starting empty");
                report.warnings.push(e);
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                let err = MetricError::malformed(key, e);
                warn!(key = key, error = %err, "Malformed persisted metrics, starting empty");
                report.warnings.push(err);
                T::default()
            }
        }
    }
}

/// Collapse duplicate records by id
///
/// Within a collection the highest version wins and keeps the position of
/// the first occurrence. Across collections the higher version wins and a
/// tie goes to the approved copy. Returns the cleaned collections and the
/// number of records dropped.
pub fn reconcile(
    pending: Vec<MetricRecord>,
    approved: Vec<MetricRecord>,
) -> (Vec<MetricRecord>, Vec<MetricRecord>, usize) {
    let (mut pending, pending_dropped) = dedupe(pending);
    let (mut approved, approved_dropped) = dedupe(approved);

    let approved_versions: HashMap<MetricId, u32> =
        approved.iter().map(|r| (r.id.clone(), r.version)).collect();
    let mut stale_approved: HashSet<MetricId> = HashSet::new();

    let before = pending.len();
    pending.retain(|record| match approved_versions.get(&record.id) {
        Some(&version) if record.version > version => {
            stale_approved.insert(record.id.clone());
            true
        }
        Some(_) => false,
        None => true,
    });
    let cross_dropped = before - pending.len() + stale_approved.len();
    approved.retain(|record| !stale_approved.contains(&record.id));

    (
        pending,
        approved,
        pending_dropped + approved_dropped + cross_dropped,
    )
}

fn dedupe(records: Vec<MetricRecord>) -> (Vec<MetricRecord>, usize) {
    let mut kept: Vec<MetricRecord> = Vec::with_capacity(records.len());
    let mut index: HashMap<MetricId, usize> = HashMap::new();
    let mut dropped = 0;

    for record in records {
        match index.get(&record.id) {
            Some(&pos) => {
                dropped += 1;
                if record.version > kept[pos].version {
                    kept[pos] = record;
                }
            }
            None => {
                index.insert(record.id.clone(), kept.len());
                kept.push(record);
            }
        }
    }

    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryKvStore;
    use crate::types::{MetricDefinition, MetricStatus};
    use chrono::Utc;

    fn record(id: &str, version: u32, status: MetricStatus) -> MetricRecord {
        let mut r = MetricRecord::pending(
            MetricId::new(id),
            MetricDefinition::new(format!("Metric {}", id), "Finance", "Alice"),
            Utc::now(),
        );
        r.version = version;
        r.status = status;
        r
    }

    #[test]
    fn test_load_empty_store() {
        let persistence = MetricPersistence::new(Arc::new(MemoryKvStore::new()));
        let state = persistence.load();

        assert!(state.pending.is_empty());
        assert!(state.approved.is_empty());
        assert!(state.columns.is_empty());
        assert!(state.report.is_clean());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let store = Arc::new(MemoryKvStore::new());
        let persistence = MetricPersistence::new(store.clone());

        let pending = vec![record("p1", 1, MetricStatus::Pending)];
        let approved = vec![record("a1", 3, MetricStatus::Approved)];
        persistence.save_collections(&pending, &approved).unwrap();
        persistence
            .save_columns(&["a".to_string(), "b".to_string()])
            .unwrap();

        let state = MetricPersistence::new(store).load();
        assert_eq!(state.pending, pending);
        assert_eq!(state.approved, approved);
        assert_eq!(state.columns, vec!["a", "b"]);
    }

    #[test]
    fn test_malformed_entry_keeps_readable_records() {
        let good = record("p1", 1, MetricStatus::Pending);
        let pending = serde_json::json!([
            serde_json::to_value(&good).unwrap(),
            { "id": 7, "metricName": "Broken" },
        ]);
        let store = MemoryKvStore::with_entries([(PENDING_KEY, pending.to_string())]);
        let state = MetricPersistence::new(Arc::new(store)).load();

        assert_eq!(state.pending, vec![good]);
        assert_eq!(state.report.warnings.len(), 1);
        assert_eq!(state.report.warnings[0].code(), "MC-STORE-002");
        assert!(state.report.warnings[0].to_string().contains("pendingMetrics[1]"));
    }

    #[test]
    fn test_malformed_key_falls_back_to_empty() {
        let store = MemoryKvStore::with_entries([
            (PENDING_KEY, "{not json"),
            (APPROVED_KEY, "[]"),
        ]);
        let state = MetricPersistence::new(Arc::new(store)).load();

        assert!(state.pending.is_empty());
        assert_eq!(state.report.warnings.len(), 1);
        assert_eq!(state.report.warnings[0].code(), "MC-STORE-002");
    }

    #[test]
    fn test_reconcile_within_collection_keeps_highest_version() {
        let pending = vec![
            record("m1", 1, MetricStatus::Pending),
            record("m2", 1, MetricStatus::Pending),
            record("m1", 3, MetricStatus::Pending),
        ];
        let (pending, approved, dropped) = reconcile(pending, Vec::new());

        assert_eq!(dropped, 1);
        assert!(approved.is_empty());
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].id.as_str(), "m1");
        assert_eq!(pending[0].version, 3);
    }

    #[test]
    fn test_reconcile_tie_across_collections_prefers_approved() {
        let pending = vec![record("m1", 2, MetricStatus::Pending)];
        let approved = vec![record("m1", 2, MetricStatus::Approved)];
        let (pending, approved, dropped) = reconcile(pending, approved);

        assert_eq!(dropped, 1);
        assert!(pending.is_empty());
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].status, MetricStatus::Approved);
    }

    #[test]
    fn test_reconcile_newer_pending_copy_wins() {
        let pending = vec![record("m1", 4, MetricStatus::Pending)];
        let approved = vec![
            record("m1", 2, MetricStatus::Approved),
            record("m9", 1, MetricStatus::Approved),
        ];
        let (pending, approved, dropped) = reconcile(pending, approved);

        assert_eq!(dropped, 1);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].version, 4);
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id.as_str(), "m9");
    }
}
