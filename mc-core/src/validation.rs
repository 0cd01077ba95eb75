//! Draft validation
//!
//! Checks the creation form applies before a draft reaches the lifecycle
//! manager. The manager itself accepts any draft.

use crate::error::MetricError;
use crate::registry::DatasetColumnRegistry;
use crate::types::MetricDefinition;

/// Validate a creation draft against the current dataset
///
/// Returns every violation found, in field order. An empty vector means the
/// draft can be submitted.
pub fn validate_draft(draft: &MetricDefinition, columns: &DatasetColumnRegistry) -> Vec<MetricError> {
    let mut errors = Vec::new();

    let required = [
        ("metricName", &draft.metric_name),
        ("domain", &draft.domain),
        ("businessOwner", &draft.business_owner),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(MetricError::MissingField {
                field: field.to_string(),
            });
        }
    }

    if columns.is_empty() {
        errors.push(MetricError::NoDatasetColumns);
        return errors;
    }

    for column in &draft.selected_columns {
        if !columns.contains(column) {
            errors.push(MetricError::UnknownColumn {
                column: column.clone(),
            });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> DatasetColumnRegistry {
        DatasetColumnRegistry::from_columns(vec!["order_id".into(), "amount".into()])
    }

    #[test]
    fn test_valid_draft() {
        let draft = MetricDefinition::new("Revenue", "Finance", "Alice").with_columns(["amount"]);
        assert!(validate_draft(&draft, &registry()).is_empty());
    }

    #[test]
    fn test_blank_required_fields() {
        let draft = MetricDefinition::new("  ", "Finance", "");
        let errors = validate_draft(&draft, &registry());
        assert_eq!(
            errors,
            vec![
                MetricError::MissingField { field: "metricName".into() },
                MetricError::MissingField { field: "businessOwner".into() },
            ]
        );
    }

    #[test]
    fn test_requires_uploaded_dataset() {
        let draft = MetricDefinition::new("Revenue", "Finance", "Alice").with_columns(["amount"]);
        let errors = validate_draft(&draft, &DatasetColumnRegistry::new());
        assert_eq!(errors, vec![MetricError::NoDatasetColumns]);
    }

    #[test]
    fn test_unknown_column() {
        let draft = MetricDefinition::new("Revenue", "Finance", "Alice").with_columns(["amount", "tax"]);
        let errors = validate_draft(&draft, &registry());
        assert_eq!(errors, vec![MetricError::UnknownColumn { column: "tax".into() }]);
    }
}
