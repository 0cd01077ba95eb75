//! Metric Contract Error Codes
//!
//! Error code format: MC-{area}-{sequence}
//! - MC-METRIC: Lifecycle lookups
//! - MC-STORE: Persistence and decoding
//! - MC-VALID: Draft validation
//! - MC-CONFIG: Configuration
//!
//! Lifecycle operations never surface these as fatal errors: lookups report
//! absence with `Option`, and persistence failures are downgraded to
//! warnings by the lifecycle manager.

use thiserror::Error;

/// Metric contract result type
pub type MetricResult<T> = Result<T, MetricError>;

/// Metric contract error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricError {
    // ============================================================
    // Lifecycle Errors (MC-METRIC-*)
    // ============================================================
    /// [MC-METRIC-001] Metric not found in either collection
    #[error("[MC-METRIC-001] Metric {id} not found")]
    MetricNotFound { id: String },

    /// [MC-METRIC-002] Metric exists but is not awaiting approval
    #[error("[MC-METRIC-002] Metric {id} is not pending approval")]
    NotPending { id: String },

    // ============================================================
    // Store Errors (MC-STORE-*)
    // ============================================================
    /// [MC-STORE-001] Backend read or write failed
    #[error("[MC-STORE-001] Storage {operation} failed: {reason}")]
    Storage { operation: String, reason: String },

    /// [MC-STORE-002] Stored value could not be decoded
    #[error("[MC-STORE-002] Malformed data under key {key}: {reason}")]
    MalformedData { key: String, reason: String },

    /// [MC-STORE-003] Value could not be encoded
    #[error("[MC-STORE-003] Serialization failed: {reason}")]
    Serialization { reason: String },

    // ============================================================
    // Validation Errors (MC-VALID-*)
    // ============================================================
    /// [MC-VALID-001] Required field left blank
    #[error("[MC-VALID-001] Required field {field} is empty")]
    MissingField { field: String },

    /// [MC-VALID-002] No dataset uploaded yet
    #[error("[MC-VALID-002] No dataset columns available, upload a dataset first")]
    NoDatasetColumns,

    /// [MC-VALID-003] Selected column not part of the dataset
    #[error("[MC-VALID-003] Column {column} is not in the current dataset")]
    UnknownColumn { column: String },

    // ============================================================
    // Configuration Errors (MC-CONFIG-*)
    // ============================================================
    /// [MC-CONFIG-001] Invalid configuration value
    #[error("[MC-CONFIG-001] Configuration error: {reason}")]
    Configuration { reason: String },
}

impl MetricError {
    /// Create a storage error
    pub fn storage(operation: impl Into<String>, reason: impl ToString) -> Self {
        MetricError::Storage {
            operation: operation.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a malformed data error
    pub fn malformed(key: impl Into<String>, reason: impl ToString) -> Self {
        MetricError::MalformedData {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        MetricError::MetricNotFound { id: id.into() }
    }

    /// Get the error code
    pub fn code(&self) -> &'static str {
        match self {
            MetricError::MetricNotFound { .. } => "MC-METRIC-001",
            MetricError::NotPending { .. } => "MC-METRIC-002",
            MetricError::Storage { .. } => "MC-STORE-001",
            MetricError::MalformedData { .. } => "MC-STORE-002",
            MetricError::Serialization { .. } => "MC-STORE-003",
            MetricError::MissingField { .. } => "MC-VALID-001",
            MetricError::NoDatasetColumns => "MC-VALID-002",
            MetricError::UnknownColumn { .. } => "MC-VALID-003",
            MetricError::Configuration { .. } => "MC-CONFIG-001",
        }
    }

    /// Whether the error came from the persistence layer
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            MetricError::Storage { .. }
                | MetricError::MalformedData { .. }
                | MetricError::Serialization { .. }
        )
    }

    /// Whether the error is a draft validation failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MetricError::MissingField { .. }
                | MetricError::NoDatasetColumns
                | MetricError::UnknownColumn { .. }
        )
    }
}

impl From<serde_json::Error> for MetricError {
    fn from(e: serde_json::Error) -> Self {
        MetricError::Serialization {
            reason: e.to_string(),
        }
    }
}
