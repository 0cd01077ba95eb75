//! Metric Contracts Core
//!
//! Lifecycle management for metric contracts: structured business-metric
//! definitions that are drafted against an uploaded dataset's columns,
//! submitted for review, and approved by an administrator.
//!
//! # Lifecycle Invariants
//!
//! | Invariant | Requirement |
//! |-----------|-------------|
//! | **Unique id** | An id appears once across pending and approved |
//! | **Single home** | A record lives in exactly one collection |
//! | **Monotonic version** | +1 per update, unchanged by approval |
//! | **One-way approval** | Pending → Approved only |
//! | **Fixed identity** | `id`, `uuid`, `createdAt` never change after creation |
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │        Front ends (metricctl, dashboards)       │
//! ├────────────────────────────────────────────────┤
//! │  MetricLifecycleManager   DatasetColumnRegistry │
//! ├────────────────────────────────────────────────┤
//! │  MetricPersistence (encode, reconcile on load)  │
//! ├────────────────────────────────────────────────┤
//! │  KeyValueStore: MemoryKvStore │ SledKvStore     │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mc_core::{MemoryKvStore, MetricDefinition, MetricLifecycleManager, MetricPatch};
//!
//! let mut manager = MetricLifecycleManager::load(Arc::new(MemoryKvStore::new()));
//! let created = manager.create(MetricDefinition::new("Revenue", "Finance", "Alice"));
//! let updated = manager
//!     .update(&created.id, MetricPatch::new().description("Gross revenue"))
//!     .unwrap();
//! assert_eq!(updated.version, 2);
//!
//! let approved = manager.approve(&created.id, "Bob").unwrap();
//! assert_eq!(approved.version, 2);
//! assert!(manager.pending().is_empty());
//! ```

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod registry;
pub mod store;
pub mod types;
pub mod validation;

pub use config::MetricsConfig;
pub use error::{MetricError, MetricResult};
pub use lifecycle::{LifecycleStats, MetricLifecycleManager, MetricQuery, DEFAULT_RECENT_LIMIT};
pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
pub use registry::DatasetColumnRegistry;
pub use store::{KeyValueStore, LoadReport, MemoryKvStore, MetricPersistence, StoreConfig};
pub use types::*;
pub use validation::validate_draft;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
