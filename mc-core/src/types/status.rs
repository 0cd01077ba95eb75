//! Metric status

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a metric contract
///
/// Only `Pending -> Approved` is reachable through the lifecycle manager.
/// The remaining variants are display statuses that may appear in data
/// imported from elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricStatus {
    /// Awaiting administrator approval
    Pending,
    /// Reviewed and accepted
    Approved,
    /// Terminal display status
    Certified,
    Draft,
    #[serde(rename = "In Review")]
    InReview,
    Deprecated,
}

impl MetricStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricStatus::Pending => "Pending",
            MetricStatus::Approved => "Approved",
            MetricStatus::Certified => "Certified",
            MetricStatus::Draft => "Draft",
            MetricStatus::InReview => "In Review",
            MetricStatus::Deprecated => "Deprecated",
        }
    }

    /// Whether `self -> next` is a transition the lifecycle allows
    pub fn can_transition_to(&self, next: MetricStatus) -> bool {
        matches!((self, next), (MetricStatus::Pending, MetricStatus::Approved))
    }
}

impl Default for MetricStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for MetricStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
