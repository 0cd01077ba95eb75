//! Metric contract records
//!
//! A contract is split into the business definition supplied by the author
//! ([`MetricDefinition`]) and the lifecycle envelope the manager owns
//! ([`MetricRecord`]). Edits are expressed as a [`MetricPatch`], which can
//! only reach the definition, so identity and lifecycle fields are immutable
//! by construction.

use serde::{Deserialize, Serialize};

use super::common::{MetricId, Timestamp};
use super::status::MetricStatus;

/// Business definition of a metric contract
///
/// Also used as the creation draft. Every text field is free-form; formula
/// fields describe logic and are never executed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricDefinition {
    // Identity
    pub metric_name: String,
    pub domain: String,
    pub business_owner: String,
    pub technical_steward: String,

    // Business definition
    pub description: String,
    pub business_purpose: String,
    pub use_cases: String,
    pub exclusion_scenarios: String,
    pub unit_of_measure: String,
    pub interpretation_rules: String,

    // Abstract business formula
    pub abstract_inputs: String,
    pub aggregation_logic: String,
    pub window_logic: String,
    pub filter_rules: String,

    /// Dataset columns this metric derives from, in selection order
    pub selected_columns: Vec<String>,
}

impl MetricDefinition {
    /// Create a draft with the three identity fields the creation form requires
    pub fn new(
        metric_name: impl Into<String>,
        domain: impl Into<String>,
        business_owner: impl Into<String>,
    ) -> Self {
        Self {
            metric_name: metric_name.into(),
            domain: domain.into(),
            business_owner: business_owner.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_columns = columns.into_iter().map(Into::into).collect();
        self
    }
}

fn initial_version() -> u32 {
    1
}

/// Stored metric contract
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    pub id: MetricId,
    /// Human-readable contract code, see [`derive_contract_code`]
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub status: MetricStatus,
    #[serde(default = "initial_version")]
    pub version: u32,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<Timestamp>,
    #[serde(flatten)]
    pub definition: MetricDefinition,
}

impl MetricRecord {
    /// Build a fresh pending record at version 1
    pub fn pending(id: MetricId, definition: MetricDefinition, created_at: Timestamp) -> Self {
        let uuid = derive_contract_code(&definition.metric_name, &definition.domain, &created_at);
        Self {
            id,
            uuid,
            status: MetricStatus::Pending,
            version: 1,
            created_at,
            updated_at: None,
            approved_by: None,
            approved_at: None,
            definition,
        }
    }

    pub fn metric_name(&self) -> &str {
        &self.definition.metric_name
    }

    pub fn domain(&self) -> &str {
        &self.definition.domain
    }

    /// Record approval. Version and definition are left untouched.
    pub(crate) fn mark_approved(&mut self, approver: String, at: Timestamp) {
        self.status = MetricStatus::Approved;
        self.approved_by = Some(approver);
        self.approved_at = Some(at);
    }

    /// Apply an edit, bumping the version by exactly one
    pub(crate) fn apply_patch(&mut self, patch: &MetricPatch, at: Timestamp) {
        patch.apply_to(&mut self.definition);
        self.version = self.version.saturating_add(1);
        self.updated_at = Some(at);
    }
}

/// Partial edit of a metric definition
///
/// `None` leaves a field unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricPatch {
    pub metric_name: Option<String>,
    pub domain: Option<String>,
    pub business_owner: Option<String>,
    pub technical_steward: Option<String>,
    pub description: Option<String>,
    pub business_purpose: Option<String>,
    pub use_cases: Option<String>,
    pub exclusion_scenarios: Option<String>,
    pub unit_of_measure: Option<String>,
    pub interpretation_rules: Option<String>,
    pub abstract_inputs: Option<String>,
    pub aggregation_logic: Option<String>,
    pub window_logic: Option<String>,
    pub filter_rules: Option<String>,
    pub selected_columns: Option<Vec<String>>,
}

impl MetricPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn metric_name(mut self, metric_name: impl Into<String>) -> Self {
        self.metric_name = Some(metric_name.into());
        self
    }

    pub fn selected_columns(mut self, columns: Vec<String>) -> Self {
        self.selected_columns = Some(columns);
        self
    }

    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Names of the fields this patch sets, for logging
    pub fn touched_fields(&self) -> Vec<&'static str> {
        let text = [
            ("metricName", &self.metric_name),
            ("domain", &self.domain),
            ("businessOwner", &self.business_owner),
            ("technicalSteward", &self.technical_steward),
            ("description", &self.description),
            ("businessPurpose", &self.business_purpose),
            ("useCases", &self.use_cases),
            ("exclusionScenarios", &self.exclusion_scenarios),
            ("unitOfMeasure", &self.unit_of_measure),
            ("interpretationRules", &self.interpretation_rules),
            ("abstractInputs", &self.abstract_inputs),
            ("aggregationLogic", &self.aggregation_logic),
            ("windowLogic", &self.window_logic),
            ("filterRules", &self.filter_rules),
        ];
        let mut fields: Vec<&'static str> = text
            .iter()
            .filter(|(_, value)| value.is_some())
            .map(|(name, _)| *name)
            .collect();
        if self.selected_columns.is_some() {
            fields.push("selectedColumns");
        }
        fields
    }

    pub fn apply_to(&self, def: &mut MetricDefinition) {
        fn set(target: &mut String, value: &Option<String>) {
            if let Some(v) = value {
                target.clone_from(v);
            }
        }

        set(&mut def.metric_name, &self.metric_name);
        set(&mut def.domain, &self.domain);
        set(&mut def.business_owner, &self.business_owner);
        set(&mut def.technical_steward, &self.technical_steward);
        set(&mut def.description, &self.description);
        set(&mut def.business_purpose, &self.business_purpose);
        set(&mut def.use_cases, &self.use_cases);
        set(&mut def.exclusion_scenarios, &self.exclusion_scenarios);
        set(&mut def.unit_of_measure, &self.unit_of_measure);
        set(&mut def.interpretation_rules, &self.interpretation_rules);
        set(&mut def.abstract_inputs, &self.abstract_inputs);
        set(&mut def.aggregation_logic, &self.aggregation_logic);
        set(&mut def.window_logic, &self.window_logic);
        set(&mut def.filter_rules, &self.filter_rules);
        if let Some(columns) = &self.selected_columns {
            def.selected_columns.clone_from(columns);
        }
    }
}

/// Derive the human-readable contract code for a new metric
///
/// Format: `{word initials}-{first three letters of domain}-{last six digits
/// of the creation time in epoch millis}`, upper-cased. The domain is taken
/// as entered, so leading whitespace ends up in the prefix.
pub fn derive_contract_code(metric_name: &str, domain: &str, created_at: &Timestamp) -> String {
    let initials: String = metric_name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    let domain_prefix: String = domain
        .chars()
        .take(3)
        .flat_map(char::to_uppercase)
        .collect();
    let suffix = created_at.timestamp_millis().rem_euclid(1_000_000);

    format!("{}-{}-{:06}", initials, domain_prefix, suffix)
}
