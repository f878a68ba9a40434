//! Network Tester - Main CLI Application
//!
//! Runs DNS, ping and TCP probes against one host and saves a timestamped
//! text report.

use clap::Parser;
use network_tester::{cli::Cli, error::ErrorReporter, App};
use std::process;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(99);
    }));

    let cli = Cli::parse();
    let reporter = ErrorReporter::new(cli.use_colors(), cli.verbose || cli.debug);

    // Probe failures are part of the report; only pre-flight errors get here.
    if let Err(e) = App::new(cli).run().await {
        reporter.report_error(&e);
        process::exit(e.exit_code());
    }
}
