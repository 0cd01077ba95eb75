//! CLI flow tests
//!
//! Parse real argument lists and run them through the handler against a
//! sled store in a temporary directory, reopening the store between
//! commands the way separate `metricctl` invocations would.

use clap::Parser;
use mc_cli::handler::{execute, CommandOutput};
use mc_cli::{Cli, CliError, CliResult};
use mc_core::{MetricRecord, MetricStatus, StoreConfig};
use tempfile::{tempdir, TempDir};

fn invoke(dir: &TempDir, args: &[&str]) -> CliResult<CommandOutput> {
    let mut argv = vec!["metricctl"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("arguments parse");

    let config = StoreConfig::at(dir.path().to_string_lossy().to_string());
    let mut manager = mc_store::open_manager(&config)?;
    let output = execute(&mut manager, cli.command, 5);
    assert!(manager.take_persistence_warning().is_none());
    output
}

fn expect_record(output: CliResult<CommandOutput>) -> MetricRecord {
    match output {
        Ok(CommandOutput::Record(record)) => record,
        other => panic!("expected a record, got {:?}", other),
    }
}

fn expect_records(output: CliResult<CommandOutput>) -> Vec<MetricRecord> {
    match output {
        Ok(CommandOutput::Records(records)) => records,
        other => panic!("expected records, got {:?}", other),
    }
}

#[test]
fn test_full_review_flow() {
    let dir = tempdir().unwrap();

    invoke(&dir, &["columns", "set", "amount", "region", "order_date"]).unwrap();

    let created = expect_record(invoke(
        &dir,
        &[
            "create", "--name", "Revenue", "--domain", "Finance", "--owner", "Alice",
            "--column", "amount", "--column", "order_date",
        ],
    ));
    assert_eq!(created.status, MetricStatus::Pending);
    assert_eq!(created.version, 1);
    assert!(created.uuid.starts_with("R-FIN-"));

    let id = created.id.to_string();
    let updated = expect_record(invoke(&dir, &["update", &id, "--description", "Gross revenue"]));
    assert_eq!(updated.version, 2);
    assert_eq!(updated.definition.description, "Gross revenue");

    let approved = expect_record(invoke(&dir, &["approve", &id, "--by", "Bob"]));
    assert_eq!(approved.status, MetricStatus::Approved);
    assert_eq!(approved.approved_by.as_deref(), Some("Bob"));
    assert_eq!(approved.version, 2);

    let shown = expect_record(invoke(&dir, &["show", &id]));
    assert_eq!(shown, approved);

    assert!(expect_records(invoke(&dir, &["list", "--status", "pending"])).is_empty());
    assert_eq!(expect_records(invoke(&dir, &["list", "--status", "approved"])).len(), 1);

    match invoke(&dir, &["stats"]).unwrap() {
        CommandOutput::Stats(stats) => {
            assert_eq!(stats.pending, 0);
            assert_eq!(stats.approved, 1);
            assert_eq!(stats.total, 1);
        }
        other => panic!("expected stats, got {:?}", other),
    }
}

#[test]
fn test_create_is_validated() {
    let dir = tempdir().unwrap();

    // No dataset uploaded and no owner given
    let err = invoke(&dir, &["create", "--name", "Revenue", "--domain", "Finance"]).unwrap_err();
    match &err {
        CliError::ValidationError { errors } => {
            let codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
            assert_eq!(codes, vec!["MC-VALID-001", "MC-VALID-002"]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(err.exit_code(), 3);

    invoke(&dir, &["columns", "set", "amount"]).unwrap();
    let err = invoke(
        &dir,
        &["create", "--name", "Revenue", "--domain", "Finance", "--owner", "Alice", "--column", "price"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("price"));

    assert!(expect_records(invoke(&dir, &["list"])).is_empty());
}

#[test]
fn test_unknown_ids_are_not_found() {
    let dir = tempdir().unwrap();

    for args in [
        vec!["show", "metric:missing"],
        vec!["approve", "metric:missing", "--by", "Bob"],
        vec!["update", "metric:missing", "--unit", "USD"],
    ] {
        let err = invoke(&dir, &args).unwrap_err();
        match &err {
            CliError::CoreError(core) => assert_eq!(core.code(), "MC-METRIC-001", "{:?}", args),
            other => panic!("expected not found for {:?}, got {:?}", args, other),
        }
        assert_eq!(err.exit_code(), 4);
    }
}

#[test]
fn test_approving_twice_reports_not_pending() {
    let dir = tempdir().unwrap();
    invoke(&dir, &["columns", "set", "amount"]).unwrap();
    let created = expect_record(invoke(
        &dir,
        &["create", "--name", "Revenue", "--domain", "Finance", "--owner", "Alice"],
    ));
    let id = created.id.to_string();

    invoke(&dir, &["approve", &id, "--by", "Bob"]).unwrap();
    let err = invoke(&dir, &["approve", &id, "--by", "Carol"]).unwrap_err();

    match err {
        CliError::CoreError(core) => assert_eq!(core.code(), "MC-METRIC-002"),
        other => panic!("expected not pending, got {:?}", other),
    }
    let shown = expect_record(invoke(&dir, &["show", &id]));
    assert_eq!(shown.approved_by.as_deref(), Some("Bob"));
}

#[test]
fn test_recent_search_and_domains() {
    let dir = tempdir().unwrap();
    invoke(&dir, &["columns", "set", "user_id"]).unwrap();

    for (name, domain) in [
        ("Revenue", "Finance"),
        ("Churn Rate", "Marketing"),
        ("Refunds", "Finance"),
    ] {
        invoke(&dir, &["create", "--name", name, "--domain", domain, "--owner", "Alice"]).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
    }

    let recent = expect_records(invoke(&dir, &["recent", "--limit", "2"]));
    let names: Vec<&str> = recent.iter().map(|r| r.metric_name()).collect();
    assert_eq!(names, vec!["Refunds", "Churn Rate"]);

    let churn = expect_records(invoke(&dir, &["search", "CHURN"]));
    assert_eq!(churn.len(), 1);

    let finance = expect_records(invoke(&dir, &["search", "--domain", "Finance"]));
    assert_eq!(finance.len(), 2);

    match invoke(&dir, &["domains"]).unwrap() {
        CommandOutput::Domains(domains) => assert_eq!(domains, vec!["Finance", "Marketing"]),
        other => panic!("expected domains, got {:?}", other),
    }

    let err = invoke(&dir, &["recent", "--limit", "0"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_columns_show_after_set() {
    let dir = tempdir().unwrap();

    match invoke(&dir, &["columns", "show"]).unwrap() {
        CommandOutput::Columns(columns) => assert!(columns.is_empty()),
        other => panic!("expected columns, got {:?}", other),
    }

    invoke(&dir, &["columns", "set", "a", "b", "c"]).unwrap();
    match invoke(&dir, &["columns", "show"]).unwrap() {
        CommandOutput::Columns(columns) => assert_eq!(columns, vec!["a", "b", "c"]),
        other => panic!("expected columns, got {:?}", other),
    }
}
