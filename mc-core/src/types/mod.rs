//! Metric contract types

pub mod common;
pub mod metric;
pub mod status;

pub use common::{MetricId, Timestamp};
pub use metric::{derive_contract_code, MetricDefinition, MetricPatch, MetricRecord};
pub use status::MetricStatus;
