//! Output Formatting
//!
//! Utilities for formatting CLI output in various formats.

use crate::commands::OutputFormat;
use crate::error::CliResult;
use crate::handler::CommandOutput;
use mc_core::{LifecycleStats, MetricRecord};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format and print a command result
pub fn print_output(output: &CommandOutput, format: OutputFormat) -> CliResult<()> {
    let text = render(output, format)?;
    if !text.is_empty() {
        println!("{}", text);
    }
    Ok(())
}

/// Render a command result without printing it
pub fn render(output: &CommandOutput, format: OutputFormat) -> CliResult<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(output)?);
    }

    let text = match output {
        CommandOutput::Record(record) => render_record(record),
        CommandOutput::Records(records) => match format {
            OutputFormat::Plain => render_plain_rows(records),
            _ => render_record_table(records),
        },
        CommandOutput::Columns(columns) => {
            if columns.is_empty() {
                "No dataset uploaded".to_string()
            } else {
                columns.join("\n")
            }
        }
        CommandOutput::Domains(domains) => domains.join("\n"),
        CommandOutput::Stats(stats) => render_stats(stats),
    };
    Ok(text)
}

fn render_record(record: &MetricRecord) -> String {
    let def = &record.definition;
    let mut lines = vec![
        "Metric Contract".to_string(),
        "===============".to_string(),
        format!("ID:                {}", record.id),
        format!("Code:              {}", record.uuid),
        format!("Status:            {}", record.status),
        format!("Version:           {}", record.version),
        format!("Created At:        {}", record.created_at.format(TIME_FORMAT)),
    ];
    if let Some(at) = record.updated_at {
        lines.push(format!("Updated At:        {}", at.format(TIME_FORMAT)));
    }
    if let Some(by) = &record.approved_by {
        lines.push(format!("Approved By:       {}", by));
    }
    if let Some(at) = record.approved_at {
        lines.push(format!("Approved At:       {}", at.format(TIME_FORMAT)));
    }

    lines.push(String::new());
    let fields = [
        ("Name", &def.metric_name),
        ("Domain", &def.domain),
        ("Business Owner", &def.business_owner),
        ("Technical Steward", &def.technical_steward),
        ("Description", &def.description),
        ("Purpose", &def.business_purpose),
        ("Use Cases", &def.use_cases),
        ("Exclusions", &def.exclusion_scenarios),
        ("Unit", &def.unit_of_measure),
        ("Interpretation", &def.interpretation_rules),
        ("Inputs", &def.abstract_inputs),
        ("Aggregation", &def.aggregation_logic),
        ("Window", &def.window_logic),
        ("Filters", &def.filter_rules),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            lines.push(format!("{:<19}{}", format!("{}:", label), value));
        }
    }
    if !def.selected_columns.is_empty() {
        lines.push(format!("{:<19}{}", "Columns:", def.selected_columns.join(", ")));
    }

    lines.join("\n")
}

fn render_record_table(records: &[MetricRecord]) -> String {
    if records.is_empty() {
        return "No metric contracts".to_string();
    }

    let headers = ["ID", "CODE", "STATUS", "VER", "NAME", "DOMAIN", "CREATED"];
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.uuid.clone(),
                r.status.to_string(),
                r.version.to_string(),
                r.metric_name().to_string(),
                r.domain().to_string(),
                r.created_at.format(TIME_FORMAT).to_string(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(headers.iter().map(|h| h.to_string()).collect()));
    for row in rows {
        lines.push(format_row(row));
    }
    lines.join("\n")
}

fn render_plain_rows(records: &[MetricRecord]) -> String {
    records
        .iter()
        .map(|r| format!("{}\t{}\t{}\t{}", r.id, r.status, r.version, r.metric_name()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_stats(stats: &LifecycleStats) -> String {
    [
        "Metric Contract Statistics".to_string(),
        "==========================".to_string(),
        format!("Pending:  {}", stats.pending),
        format!("Approved: {}", stats.approved),
        format!("Total:    {}", stats.total),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_core::{MetricDefinition, MetricId};

    fn sample() -> MetricRecord {
        MetricRecord::pending(
            MetricId::new("metric:1"),
            MetricDefinition::new("Revenue", "Finance", "Alice").with_columns(["amount"]),
            fixed_time(),
        )
    }

    fn fixed_time() -> mc_core::Timestamp {
        "2024-06-10T06:13:20Z".parse().unwrap()
    }

    #[test]
    fn test_render_record_detail() {
        let text = render(&CommandOutput::Record(sample()), OutputFormat::Table).unwrap();
        assert!(text.contains("ID:                metric:1"));
        assert!(text.contains("Status:            Pending"));
        assert!(text.contains("Columns:           amount"));
        assert!(!text.contains("Approved By"));
    }

    #[test]
    fn test_render_table_has_header_and_rows() {
        let text = render(&CommandOutput::Records(vec![sample()]), OutputFormat::Table).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("Revenue"));
        assert!(lines[1].contains("2024-06-10 06:13:20"));
    }

    #[test]
    fn test_render_plain_rows() {
        let text = render(&CommandOutput::Records(vec![sample()]), OutputFormat::Plain).unwrap();
        assert_eq!(text, "metric:1\tPending\t1\tRevenue");
    }

    #[test]
    fn test_render_json_is_the_record() {
        let text = render(&CommandOutput::Record(sample()), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["id"], "metric:1");
        assert_eq!(value["metricName"], "Revenue");
        assert_eq!(value["status"], "Pending");
    }

    #[test]
    fn test_render_empty_results() {
        let records = render(&CommandOutput::Records(vec![]), OutputFormat::Table).unwrap();
        assert_eq!(records, "No metric contracts");
        let columns = render(&CommandOutput::Columns(vec![]), OutputFormat::Table).unwrap();
        assert_eq!(columns, "No dataset uploaded");
    }

    #[test]
    fn test_render_stats() {
        let stats = LifecycleStats {
            pending: 2,
            approved: 1,
            total: 3,
        };
        let text = render(&CommandOutput::Stats(stats), OutputFormat::Plain).unwrap();
        assert!(text.contains("Total:    3"));
    }
}
