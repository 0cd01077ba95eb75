//! Command Handlers
//!
//! Handler functions for CLI commands. Handlers run against an explicitly
//! opened manager and return a [`CommandOutput`] for the output layer.

use crate::commands::{CollectionFilter, ColumnCommands, Cli, Commands, DefinitionFields};
use crate::error::{CliError, CliResult};
use crate::output;
use mc_core::{
    validate_draft, KeyValueStore, LifecycleStats, MetricError, MetricId, MetricLifecycleManager,
    MetricQuery, MetricRecord, MetricsConfig,
};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Result of a handled command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
    Record(MetricRecord),
    Records(Vec<MetricRecord>),
    Columns(Vec<String>),
    Domains(Vec<String>),
    Stats(LifecycleStats),
}

/// Resolve configuration from the environment and CLI overrides
pub fn resolve_config(cli: &Cli) -> CliResult<MetricsConfig> {
    let mut config = MetricsConfig::from_env();
    if let Some(dir) = &cli.data_dir {
        config.store.data_dir = dir.clone();
    }
    if cli.verbose {
        config.log = mc_core::LogConfig::development();
    }
    config
        .validate()
        .map_err(|e| CliError::config(e.to_string()))?;
    Ok(config)
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli, config: &MetricsConfig) -> CliResult<()> {
    let mut manager = mc_store::open_manager(&config.store)?;

    for warning in &manager.load_report().warnings {
        eprintln!("Warning: {}", warning);
    }

    let result = execute(&mut manager, cli.command, config.recent_limit)?;

    if let Some(failure) = manager.take_persistence_warning() {
        eprintln!("Warning: change applied but not saved: {}", failure);
    }

    output::print_output(&result, cli.format)
}

/// Execute one command against `manager`
pub fn execute<S: KeyValueStore>(
    manager: &mut MetricLifecycleManager<S>,
    command: Commands,
    recent_limit: usize,
) -> CliResult<CommandOutput> {
    match command {
        Commands::Columns(cmd) => handle_columns(manager, cmd),
        Commands::Create { fields } => handle_create(manager, fields),
        Commands::Approve { id, approver } => handle_approve(manager, id, approver),
        Commands::Update { id, fields } => handle_update(manager, id, fields),
        Commands::Show { id } => handle_show(manager, id),
        Commands::List { status } => Ok(handle_list(manager, status)),
        Commands::Recent { limit } => handle_recent(manager, limit.unwrap_or(recent_limit)),
        Commands::Search { term, domain } => Ok(handle_search(manager, term, domain)),
        Commands::Domains => Ok(CommandOutput::Domains(manager.domains())),
        Commands::Stats => Ok(CommandOutput::Stats(manager.stats())),
    }
}

fn handle_columns<S: KeyValueStore>(
    manager: &mut MetricLifecycleManager<S>,
    cmd: ColumnCommands,
) -> CliResult<CommandOutput> {
    match cmd {
        ColumnCommands::Set { columns } => {
            if columns.iter().any(|c| c.trim().is_empty()) {
                return Err(CliError::invalid_arg("column names must not be blank"));
            }
            manager.set_dataset_columns(columns);
        }
        ColumnCommands::Show => {}
    }
    Ok(CommandOutput::Columns(manager.dataset_columns().to_vec()))
}

fn handle_create<S: KeyValueStore>(
    manager: &mut MetricLifecycleManager<S>,
    fields: DefinitionFields,
) -> CliResult<CommandOutput> {
    let draft = fields.into_draft();

    let errors = validate_draft(&draft, manager.column_registry());
    if !errors.is_empty() {
        warn!(
            metric_name = %draft.metric_name,
            problems = errors.len(),
            "Rejected metric draft"
        );
        return Err(CliError::ValidationError { errors });
    }

    Ok(CommandOutput::Record(manager.create(draft)))
}

fn handle_approve<S: KeyValueStore>(
    manager: &mut MetricLifecycleManager<S>,
    id: String,
    approver: String,
) -> CliResult<CommandOutput> {
    if approver.trim().is_empty() {
        return Err(CliError::invalid_arg("approver name must not be blank"));
    }

    let id = MetricId::new(id);
    match manager.approve(&id, approver) {
        Some(record) => Ok(CommandOutput::Record(record)),
        None if manager.get_by_id(&id).is_some() => Err(MetricError::NotPending {
            id: id.to_string(),
        }
        .into()),
        None => Err(MetricError::not_found(id.as_str()).into()),
    }
}

fn handle_update<S: KeyValueStore>(
    manager: &mut MetricLifecycleManager<S>,
    id: String,
    fields: DefinitionFields,
) -> CliResult<CommandOutput> {
    let id = MetricId::new(id);
    let patch = fields.into_patch();
    if patch.is_empty() {
        info!(metric_id = %id, "Update without field changes still bumps the version");
    }

    manager
        .update(&id, patch)
        .map(CommandOutput::Record)
        .ok_or_else(|| MetricError::not_found(id.as_str()).into())
}

fn handle_show<S: KeyValueStore>(
    manager: &MetricLifecycleManager<S>,
    id: String,
) -> CliResult<CommandOutput> {
    let id = MetricId::new(id);
    manager
        .get_by_id(&id)
        .cloned()
        .map(CommandOutput::Record)
        .ok_or_else(|| MetricError::not_found(id.as_str()).into())
}

fn handle_list<S: KeyValueStore>(
    manager: &MetricLifecycleManager<S>,
    filter: CollectionFilter,
) -> CommandOutput {
    let records = match filter {
        CollectionFilter::Pending => manager.pending().to_vec(),
        CollectionFilter::Approved => manager.approved().to_vec(),
        CollectionFilter::All => manager.all().cloned().collect(),
    };
    CommandOutput::Records(records)
}

fn handle_recent<S: KeyValueStore>(
    manager: &MetricLifecycleManager<S>,
    limit: usize,
) -> CliResult<CommandOutput> {
    if limit == 0 {
        return Err(CliError::invalid_arg("limit must be at least 1"));
    }
    let records = manager.recent(limit).into_iter().cloned().collect();
    Ok(CommandOutput::Records(records))
}

fn handle_search<S: KeyValueStore>(
    manager: &MetricLifecycleManager<S>,
    term: Option<String>,
    domain: Option<String>,
) -> CommandOutput {
    let mut query = MetricQuery::new();
    if let Some(term) = term {
        query = query.term(term);
    }
    if let Some(domain) = domain {
        query = query.domain(domain);
    }

    let records: Vec<MetricRecord> = manager.search(&query).into_iter().cloned().collect();
    debug!(matches = records.len(), "Search completed");
    CommandOutput::Records(records)
}
