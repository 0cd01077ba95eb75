//! CLI Commands Module

pub mod columns;
pub mod metric;

use clap::{Parser, Subcommand};

pub use columns::ColumnCommands;
pub use metric::{CollectionFilter, DefinitionFields};

/// Metric contract CLI
#[derive(Parser, Debug)]
#[command(name = "metricctl")]
#[command(version)]
#[command(about = "Define, review and approve metric contracts")]
#[command(long_about = "A command-line tool for metric contracts.\n\n\
    Upload dataset columns, submit metric definitions for review, approve \
    pending contracts and browse what has been approved.")]
pub struct Cli {
    /// Data directory (env: MC_DATA_DIR)
    #[arg(short, long, env = "MC_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Output format (json, table, plain)
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Table format (human-readable)
    Table,
    /// Plain text
    Plain,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Table
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the dataset column registry
    #[command(subcommand)]
    Columns(ColumnCommands),

    /// Submit a new metric contract for review
    Create {
        #[command(flatten)]
        fields: DefinitionFields,
    },

    /// Approve a pending metric contract
    Approve {
        /// Metric ID
        id: String,
        /// Name of the approving administrator
        #[arg(long = "by")]
        approver: String,
    },

    /// Edit a metric contract (bumps its version)
    Update {
        /// Metric ID
        id: String,
        #[command(flatten)]
        fields: DefinitionFields,
    },

    /// Show one metric contract
    Show {
        /// Metric ID
        id: String,
    },

    /// List metric contracts
    List {
        /// Which collection to list
        #[arg(short, long, value_enum, default_value = "all")]
        status: CollectionFilter,
    },

    /// Most recently created metric contracts
    Recent {
        /// Number of contracts to show (env: MC_RECENT_LIMIT)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Search by name, domain or description
    Search {
        /// Search term
        term: Option<String>,
        /// Only this exact domain
        #[arg(long)]
        domain: Option<String>,
    },

    /// List distinct domains
    Domains,

    /// Show collection counts
    Stats,
}
