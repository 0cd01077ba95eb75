//! Metric Lifecycle Manager
//!
//! Owns the pending and approved collections and the dataset column
//! registry, and writes them back to the store after every mutation.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::query::{distinct_domains, most_recent, LifecycleStats, MetricQuery};
use crate::error::MetricError;
use crate::registry::DatasetColumnRegistry;
use crate::store::{KeyValueStore, LoadReport, MetricPersistence};
use crate::types::{MetricDefinition, MetricId, MetricPatch, MetricRecord, MetricStatus};

/// Which collection currently holds a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    Pending(usize),
    Approved(usize),
}

/// Metric lifecycle manager
///
/// Built explicitly from a store handle and passed to whoever needs it; the
/// only route to mutation is `&mut self`.
///
/// Persistence failures never abort an operation. The in-memory state is
/// updated regardless, the failure is logged, and the last one is kept for
/// [`take_persistence_warning`](Self::take_persistence_warning).
#[derive(Debug)]
pub struct MetricLifecycleManager<S: KeyValueStore> {
    persistence: MetricPersistence<S>,
    pending: Vec<MetricRecord>,
    approved: Vec<MetricRecord>,
    columns: DatasetColumnRegistry,
    load_report: LoadReport,
    persistence_warning: Option<MetricError>,
}

impl<S: KeyValueStore> MetricLifecycleManager<S> {
    /// Create a manager initialized from whatever the store holds
    pub fn load(store: Arc<S>) -> Self {
        let persistence = MetricPersistence::new(store);
        let state = persistence.load();

        info!(
            pending = state.pending.len(),
            approved = state.approved.len(),
            columns = state.columns.len(),
            "Metric lifecycle manager initialized"
        );

        Self {
            persistence,
            pending: state.pending,
            approved: state.approved,
            columns: DatasetColumnRegistry::from_columns(state.columns),
            load_report: state.report,
            persistence_warning: None,
        }
    }

    /// Report produced while loading persisted state
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    // ==================== Lifecycle operations ====================

    /// Submit a new metric for review
    ///
    /// The record starts Pending at version 1 and is appended to the pending
    /// collection.
    pub fn create(&mut self, draft: MetricDefinition) -> MetricRecord {
        let mut id = MetricId::generate();
        while self.locate(&id).is_some() {
            id = MetricId::generate();
        }

        let record = MetricRecord::pending(id, draft, Utc::now());
        self.pending.push(record.clone());

        info!(
            metric_id = %record.id,
            contract = %record.uuid,
            domain = %record.domain(),
            "Metric created"
        );

        self.persist_collections("create");
        record
    }

    /// Approve a pending metric
    ///
    /// Returns `None` when `id` is not in the pending collection, including
    /// when it has already been approved, or when the record's status does
    /// not allow approval. Nothing changes in that case.
    pub fn approve(&mut self, id: &MetricId, approver: impl Into<String>) -> Option<MetricRecord> {
        let Some(pos) = self.pending.iter().position(|r| &r.id == id) else {
            debug!(metric_id = %id, "Approve skipped, metric is not pending");
            return None;
        };
        let status = self.pending[pos].status;
        if !status.can_transition_to(MetricStatus::Approved) {
            debug!(metric_id = %id, status = %status, "Approve skipped, status does not allow approval");
            return None;
        }

        let mut record = self.pending.remove(pos);
        record.mark_approved(approver.into(), Utc::now());
        self.approved.push(record.clone());

        info!(
            metric_id = %record.id,
            approved_by = record.approved_by.as_deref().unwrap_or_default(),
            version = record.version,
            "Metric approved"
        );

        self.persist_collections("approve");
        Some(record)
    }

    /// Look up a metric, pending collection first
    pub fn get_by_id(&self, id: &MetricId) -> Option<&MetricRecord> {
        match self.locate(id) {
            Some(Location::Pending(pos)) => self.pending.get(pos),
            Some(Location::Approved(pos)) => self.approved.get(pos),
            None => None,
        }
    }

    /// Edit a metric in place, bumping its version by one
    ///
    /// The record stays in its current collection with its status unchanged.
    /// Returns `None` for an unknown id.
    pub fn update(&mut self, id: &MetricId, patch: MetricPatch) -> Option<MetricRecord> {
        let record = match self.locate(id) {
            Some(Location::Pending(pos)) => &mut self.pending[pos],
            Some(Location::Approved(pos)) => &mut self.approved[pos],
            None => {
                debug!(metric_id = %id, "Update skipped, metric not found");
                return None;
            }
        };

        record.apply_patch(&patch, Utc::now());
        let updated = record.clone();

        info!(
            metric_id = %updated.id,
            version = updated.version,
            status = %updated.status,
            fields = ?patch.touched_fields(),
            "Metric updated"
        );

        self.persist_collections("update");
        Some(updated)
    }

    // ==================== Dataset columns ====================

    /// Columns of the most recently uploaded dataset
    pub fn dataset_columns(&self) -> &[String] {
        self.columns.get()
    }

    pub fn column_registry(&self) -> &DatasetColumnRegistry {
        &self.columns
    }

    /// Replace the column registry with a new upload
    pub fn set_dataset_columns(&mut self, columns: Vec<String>) {
        self.columns.set(columns);
        info!(count = self.columns.len(), "Dataset columns replaced");

        if let Err(e) = self.persistence.save_columns(self.columns.get()) {
            self.record_persistence_failure("set_dataset_columns", e);
        }
    }

    // ==================== Read access ====================

    pub fn pending(&self) -> &[MetricRecord] {
        &self.pending
    }

    pub fn approved(&self) -> &[MetricRecord] {
        &self.approved
    }

    /// Every record, pending first
    pub fn all(&self) -> impl Iterator<Item = &MetricRecord> {
        self.pending.iter().chain(self.approved.iter())
    }

    /// Most recently created records across both collections
    pub fn recent(&self, limit: usize) -> Vec<&MetricRecord> {
        most_recent(self.all(), limit)
    }

    /// Records matching a search filter, pending first
    pub fn search(&self, query: &MetricQuery) -> Vec<&MetricRecord> {
        self.all().filter(|r| query.matches(r)).collect()
    }

    /// Distinct domains across both collections
    pub fn domains(&self) -> Vec<String> {
        distinct_domains(self.all())
    }

    pub fn stats(&self) -> LifecycleStats {
        LifecycleStats {
            pending: self.pending.len(),
            approved: self.approved.len(),
            total: self.pending.len() + self.approved.len(),
        }
    }

    /// Take the most recent persistence failure, if any
    pub fn take_persistence_warning(&mut self) -> Option<MetricError> {
        self.persistence_warning.take()
    }

    // ==================== Helpers ====================

    fn locate(&self, id: &MetricId) -> Option<Location> {
        if let Some(pos) = self.pending.iter().position(|r| &r.id == id) {
            return Some(Location::Pending(pos));
        }
        self.approved
            .iter()
            .position(|r| &r.id == id)
            .map(Location::Approved)
    }

    fn persist_collections(&mut self, operation: &'static str) {
        if let Err(e) = self
            .persistence
            .save_collections(&self.pending, &self.approved)
        {
            self.record_persistence_failure(operation, e);
        }
    }

    fn record_persistence_failure(&mut self, operation: &'static str, error: MetricError) {
        warn!(
            operation = operation,
            error = %error,
            "Failed to persist metric state, continuing with in-memory state"
        );
        self.persistence_warning = Some(error);
    }
}
