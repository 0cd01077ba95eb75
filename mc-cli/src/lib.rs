//! Metric Contracts CLI
//!
//! Command-line front end for the metric contract lifecycle: upload a
//! dataset's columns, submit metric definitions for review, approve them
//! and browse the results.
//!
//! # Usage
//!
//! ```text
//! metricctl [OPTIONS] <COMMAND>
//!
//! Commands:
//!   columns   Manage the dataset column registry
//!   create    Submit a new metric contract for review
//!   approve   Approve a pending metric contract
//!   update    Edit a metric contract (bumps its version)
//!   show      Show one metric contract
//!   list      List metric contracts
//!   recent    Most recently created metric contracts
//!   search    Search by name, domain or description
//!   domains   List distinct domains
//!   stats     Show collection counts
//!
//! Options:
//!   -d, --data-dir <DIR>   Data directory [env: MC_DATA_DIR]
//!   -f, --format <FORMAT>  Output format (json, table, plain) [default: table]
//!   -v, --verbose          Enable verbose logging
//! ```
//!
//! # Examples
//!
//! ```text
//! metricctl columns set user_id event_date country
//! metricctl create --name "Monthly Active Users" --domain Marketing \
//!   --owner Alice --column user_id --column event_date
//! metricctl approve metric:3f6c... --by Bob
//! metricctl -f json recent --limit 5
//! ```

pub mod commands;
pub mod error;
pub mod handler;
pub mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use error::{CliError, CliResult};
pub use handler::CommandOutput;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
