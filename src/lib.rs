//! Network Tester
//!
//! Probes a single host across three layers (DNS resolution, ICMP echo
//! through the platform `ping` utility, and TCP port connectivity with an
//! optional HTTP status check) and renders the ordered results into a
//! timestamped text report.

pub mod app;
pub mod cli;
pub mod config;
pub mod dns;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod output;
pub mod ping;
pub mod stats;
pub mod tcp;
pub mod types;

// Re-export commonly used types
pub use app::{App, RunOutcome};
pub use error::{AppError, Result};
pub use executor::{TestExecutor, ProgressReporter};
pub use models::{Config, ProbeResult, ProbeDetails, TestSession};
pub use output::{render_report, ConsoleReporter, ReportWriter};
pub use types::{Hostname, ProbeKind};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_OUTPUT_FILE: &str = "network_test_results.txt";
    pub const DEFAULT_OUTPUT_DIR: &str = "output";
    pub const DEFAULT_TCP_PORTS: &[u16] = &[80, 443];
    pub const DEFAULT_PING_COUNT: u32 = 4;
    pub const MIN_PING_COUNT: u32 = 1;
    pub const MAX_PING_COUNT: u32 = 1000;
    pub const DEFAULT_TCP_TIMEOUT: Duration = Duration::from_secs(5);
    pub const MAX_TCP_TIMEOUT_SECS: u64 = 300;
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    /// Ports on which a successful connect is followed by an HTTP HEAD probe
    pub const HTTP_PORTS: &[u16] = &[80, 443, 8080, 8443];
    /// Subset of `HTTP_PORTS` that speaks TLS
    pub const TLS_PORTS: &[u16] = &[443, 8443];
    /// Upper bound on the HTTP response bytes read
    pub const HTTP_READ_LIMIT: usize = 1024;
}
