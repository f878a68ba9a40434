//! Data models and structures for the network tester

pub mod config;
pub mod probe;
pub mod session;

// Re-export main model types
pub use config::Config;
pub use probe::{ProbeResult, ProbeDetails, DnsDetails, PingDetails, TcpDetails};
pub use session::TestSession;
