//! Dataset Column Commands

use clap::Subcommand;

/// Column registry subcommands
#[derive(Subcommand, Debug)]
pub enum ColumnCommands {
    /// Replace the registry with the header of an uploaded dataset
    Set {
        /// Column names, in dataset order
        #[arg(required = true, num_args = 1..)]
        columns: Vec<String>,
    },

    /// Show the current column registry
    Show,
}
