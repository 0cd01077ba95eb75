//! Metric lifecycle
//!
//! ```text
//!   create ──► Pending (v1) ──update──► Pending (v+1)
//!                 │
//!              approve
//!                 ▼
//!              Approved ──update──► Approved (v+1)
//! ```
//!
//! A record lives in exactly one of the pending or approved collections.
//! Approval is one-way and leaves the version untouched; every update bumps
//! the version by one. Nothing is ever deleted.

pub mod manager;
pub mod query;

pub use manager::MetricLifecycleManager;
pub use query::{distinct_domains, most_recent, LifecycleStats, MetricQuery, DEFAULT_RECENT_LIMIT};
