//! Read-side helpers for dashboards and search

use serde::{Deserialize, Serialize};

use crate::types::{MetricRecord, MetricStatus};

/// Default number of records on the recent-activity list
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Search filter
///
/// `term` matches case-insensitively against name, domain and description,
/// after surrounding whitespace is trimmed; a blank term matches everything.
/// `domain` is an exact match. Unset filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricQuery {
    pub term: Option<String>,
    pub domain: Option<String>,
    pub status: Option<MetricStatus>,
}

impl MetricQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn status(mut self, status: MetricStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, record: &MetricRecord) -> bool {
        if let Some(domain) = &self.domain {
            if record.domain() != domain {
                return false;
            }
        }
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        match self.term.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let needle = term.to_lowercase();
                let def = &record.definition;
                def.metric_name.to_lowercase().contains(&needle)
                    || def.domain.to_lowercase().contains(&needle)
                    || def.description.to_lowercase().contains(&needle)
            }
        }
    }
}

/// Most recently created records first, at most `limit`
///
/// Ties keep their input order.
pub fn most_recent<'a, I>(records: I, limit: usize) -> Vec<&'a MetricRecord>
where
    I: IntoIterator<Item = &'a MetricRecord>,
{
    let mut all: Vec<&MetricRecord> = records.into_iter().collect();
    all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    all.truncate(limit);
    all
}

/// Distinct domains in first-seen order
pub fn distinct_domains<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a MetricRecord>,
{
    let mut domains: Vec<String> = Vec::new();
    for record in records {
        if !domains.iter().any(|d| d == record.domain()) {
            domains.push(record.domain().to_string());
        }
    }
    domains
}

/// Collection counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleStats {
    pub pending: usize,
    pub approved: usize,
    pub total: usize,
}
