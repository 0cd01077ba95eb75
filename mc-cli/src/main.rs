//! metricctl entry point
//!
//! Configuration is loaded from environment variables (via .env file).
//! Command-line arguments override environment variables.

use clap::Parser;
use mc_cli::{handler, Cli};
use mc_core::init_logging;

fn main() {
    // Load .env file (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = handler::resolve_config(&cli).and_then(|config| {
        if let Err(e) = init_logging(&config.log) {
            eprintln!("Warning: {}", e);
        }
        handler::run(cli, &config)
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
