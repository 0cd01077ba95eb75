//! Metric Definition Commands
//!
//! Field flags shared by `create` and `update`.

use clap::{Args, ValueEnum};
use mc_core::{MetricDefinition, MetricPatch};

/// Collection selector for `list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollectionFilter {
    /// Awaiting approval
    Pending,
    /// Approved by an administrator
    Approved,
    /// Both collections
    All,
}

/// Metric definition fields
///
/// Every flag is optional so the same set serves drafts and patches. On
/// `create`, omitted required fields are reported by draft validation.
#[derive(Args, Debug, Clone, Default)]
pub struct DefinitionFields {
    /// Metric name
    #[arg(long)]
    pub name: Option<String>,

    /// Business domain
    #[arg(long)]
    pub domain: Option<String>,

    /// Business owner
    #[arg(long)]
    pub owner: Option<String>,

    /// Technical steward
    #[arg(long)]
    pub steward: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// Business purpose
    #[arg(long)]
    pub purpose: Option<String>,

    /// Use cases
    #[arg(long)]
    pub use_cases: Option<String>,

    /// Exclusion scenarios
    #[arg(long)]
    pub exclusions: Option<String>,

    /// Unit of measure
    #[arg(long)]
    pub unit: Option<String>,

    /// Interpretation rules
    #[arg(long)]
    pub interpretation: Option<String>,

    /// Abstract inputs
    #[arg(long)]
    pub inputs: Option<String>,

    /// Aggregation logic
    #[arg(long)]
    pub aggregation: Option<String>,

    /// Window logic
    #[arg(long)]
    pub window: Option<String>,

    /// Filter rules
    #[arg(long)]
    pub filters: Option<String>,

    /// Dataset column used by the metric (repeatable)
    #[arg(long = "column")]
    pub columns: Vec<String>,
}

impl DefinitionFields {
    /// Build a draft, leaving omitted fields blank
    pub fn into_draft(self) -> MetricDefinition {
        MetricDefinition {
            metric_name: self.name.unwrap_or_default(),
            domain: self.domain.unwrap_or_default(),
            business_owner: self.owner.unwrap_or_default(),
            technical_steward: self.steward.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            business_purpose: self.purpose.unwrap_or_default(),
            use_cases: self.use_cases.unwrap_or_default(),
            exclusion_scenarios: self.exclusions.unwrap_or_default(),
            unit_of_measure: self.unit.unwrap_or_default(),
            interpretation_rules: self.interpretation.unwrap_or_default(),
            abstract_inputs: self.inputs.unwrap_or_default(),
            aggregation_logic: self.aggregation.unwrap_or_default(),
            window_logic: self.window.unwrap_or_default(),
            filter_rules: self.filters.unwrap_or_default(),
            selected_columns: self.columns,
        }
    }

    /// Build a patch touching only the given flags
    pub fn into_patch(self) -> MetricPatch {
        MetricPatch {
            metric_name: self.name,
            domain: self.domain,
            business_owner: self.owner,
            technical_steward: self.steward,
            description: self.description,
            business_purpose: self.purpose,
            use_cases: self.use_cases,
            exclusion_scenarios: self.exclusions,
            unit_of_measure: self.unit,
            interpretation_rules: self.interpretation,
            abstract_inputs: self.inputs,
            aggregation_logic: self.aggregation,
            window_logic: self.window,
            filter_rules: self.filters,
            selected_columns: if self.columns.is_empty() {
                None
            } else {
                Some(self.columns)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_draft_blanks_missing_fields() {
        let fields = DefinitionFields {
            name: Some("Revenue".to_string()),
            columns: vec!["amount".to_string()],
            ..Default::default()
        };
        let draft = fields.into_draft();
        assert_eq!(draft.metric_name, "Revenue");
        assert!(draft.domain.is_empty());
        assert_eq!(draft.selected_columns, vec!["amount"]);
    }

    #[test]
    fn test_into_patch_only_touches_given_flags() {
        let fields = DefinitionFields {
            description: Some("Net of refunds".to_string()),
            ..Default::default()
        };
        let patch = fields.into_patch();
        assert_eq!(patch.touched_fields(), vec!["description"]);
        assert!(patch.selected_columns.is_none());
    }

    #[test]
    fn test_no_flags_is_empty_patch() {
        assert!(DefinitionFields::default().into_patch().is_empty());
    }
}
