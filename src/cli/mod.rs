//! Command-line interface

use crate::defaults::{MAX_PING_COUNT, MAX_TCP_TIMEOUT_SECS, MIN_PING_COUNT};
use clap::Parser;
use std::path::PathBuf;

/// Network Tester - DNS, ping and TCP reachability probes for a single host
#[derive(Parser, Debug, Clone)]
#[command(name = "network-tester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Target hostname or IP address
    #[arg(value_name = "HOST")]
    pub host: String,

    /// Output filename for results, saved to the output directory with a timestamp
    /// [default: network_test_results.txt]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// TCP ports to test [default: 80 443]
    #[arg(
        short,
        long,
        num_args = 1..,
        value_name = "PORT",
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub ports: Option<Vec<u16>>,

    /// Number of ping packets to send, 1-1000 [default: 4]
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(MIN_PING_COUNT as i64..=MAX_PING_COUNT as i64)
    )]
    pub count: Option<u32>,

    /// TCP connect timeout in seconds, 1-300 [default: 5]
    #[arg(short, long, value_name = "SECONDS", value_parser = parse_duration)]
    pub timeout: Option<u64>,

    /// Directory reports are written into [default: output]
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Force colored output
    #[arg(long, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Explicit color choice from the flags, if any
    pub fn color_override(&self) -> Option<bool> {
        if self.color {
            Some(true)
        } else if self.no_color {
            Some(false)
        } else {
            None
        }
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        self.color_override().unwrap_or_else(supports_color)
    }

    /// Get configuration summary for display
    pub fn get_config_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("Command Line:\n");
        summary.push_str(&format!("  Host: {}\n", self.host));
        if let Some(ref output) = self.output {
            summary.push_str(&format!("  Output file: {}\n", output));
        }
        if let Some(ref ports) = self.ports {
            let ports: Vec<String> = ports.iter().map(|p| p.to_string()).collect();
            summary.push_str(&format!("  Ports: {}\n", ports.join(" ")));
        }
        if let Some(count) = self.count {
            summary.push_str(&format!("  Ping count: {}\n", count));
        }
        if let Some(timeout) = self.timeout {
            summary.push_str(&format!("  Timeout: {}s\n", timeout));
        }
        summary.push_str(&format!("  Colored output: {}\n", self.use_colors()));
        summary.push_str(&format!("  Verbose mode: {}\n", self.verbose));
        summary.push_str(&format!("  Debug mode: {}\n", self.debug));

        summary
    }
}

/// Parse duration from seconds string
fn parse_duration(s: &str) -> Result<u64, String> {
    // Reject strings with leading + sign or other invalid formats
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid duration: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid duration: {}", s))
        .and_then(|secs| {
            if secs == 0 {
                Err("Duration must be greater than 0".to_string())
            } else if secs > MAX_TCP_TIMEOUT_SECS {
                Err(format!("Duration cannot exceed {} seconds", MAX_TCP_TIMEOUT_SECS))
            } else {
                Ok(secs)
            }
        })
}

/// Check if the terminal supports color output
pub fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // On Windows, check for ANSICON or ConEmu
    #[cfg(target_os = "windows")]
    {
        if std::env::var("ANSICON").is_ok() || std::env::var("ConEmuANSI").is_ok() {
            return true;
        }
    }

    // Default to true on Unix-like systems, false on Windows
    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}
