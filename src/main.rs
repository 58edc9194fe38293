//! Fare comparison report
//!
//! Prints the flat-rate pass costs followed by the season pass vs. single
//! ticket comparison for each distance. Configuration comes from `FARE_*`
//! environment variables (or `.env`); log verbosity from `RUST_LOG`.

use std::process::ExitCode;

use fare_compare::{report, FareConfig};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = FareConfig::from_env()?;
    report::print_report(&config)?;
    Ok(())
}
