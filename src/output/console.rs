//! Console progress output
//!
//! Prints one or more lines per probe while the run is in progress. Lines
//! are built by pure methods so they can be checked without a terminal;
//! the `ProgressReporter` impl just prints them.

use crate::{
    executor::{ProbeStep, ProgressReporter},
    models::{ProbeDetails, ProbeResult},
    output::report::format_float,
    types::Hostname,
};
use colored::{Color, Colorize};
use std::path::Path;

/// Latency classification used to color response times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceLevel {
    Excellent,  // < 50ms
    Good,       // 50-100ms
    Fair,       // 100-300ms
    Poor,       // 300-1000ms
    VeryPoor,   // > 1000ms
}

impl PerformanceLevel {
    /// Determine performance level from response time in milliseconds
    pub fn from_response_time(time_ms: f64) -> Self {
        if time_ms < 50.0 {
            Self::Excellent
        } else if time_ms < 100.0 {
            Self::Good
        } else if time_ms < 300.0 {
            Self::Fair
        } else if time_ms < 1000.0 {
            Self::Poor
        } else {
            Self::VeryPoor
        }
    }

    /// Get color for this performance level
    pub fn color(&self) -> Color {
        match self {
            Self::Excellent => Color::Green,
            Self::Good => Color::Cyan,
            Self::Fair => Color::Yellow,
            Self::Poor => Color::Magenta,
            Self::VeryPoor => Color::Red,
        }
    }
}

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            muted: Color::BrightBlack,
        }
    }
}

/// `ProgressReporter` printing to stdout
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    use_color: bool,
    scheme: ColorScheme,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            scheme: ColorScheme::default(),
        }
    }

    fn paint(&self, text: String, color: Color) -> String {
        if self.use_color {
            text.color(color).to_string()
        } else {
            text
        }
    }

    fn paint_latency(&self, ms: f64) -> String {
        self.paint(
            format!("{}ms", format_float(ms)),
            PerformanceLevel::from_response_time(ms).color(),
        )
    }

    pub fn start_line(&self, host: &Hostname) -> String {
        let line = format!("Starting network tests for {}...", host);
        if self.use_color {
            line.color(self.scheme.header).bold().to_string()
        } else {
            line
        }
    }

    pub fn step_line(&self, step: ProbeStep) -> String {
        let line = match step {
            ProbeStep::Dns => "Testing DNS resolution...".to_string(),
            ProbeStep::Ping { count } => format!("Running ping test ({} packets)...", count),
            ProbeStep::Tcp { port } => format!("Testing TCP connection on port {}...", port),
        };
        self.paint(line, self.scheme.muted)
    }

    /// Lines describing a finished probe
    pub fn result_lines(&self, result: &ProbeResult) -> Vec<String> {
        match &result.details {
            ProbeDetails::Dns(dns) => match (&dns.resolved_address, result.success) {
                (Some(address), true) => vec![format!(
                    "DNS resolved to: {}",
                    self.paint(address.clone(), self.scheme.success)
                )],
                _ => vec![self.paint(self.error_text(result), self.scheme.error)],
            },
            ProbeDetails::Ping(ping) => {
                let loss_color = if ping.packets_failed == 0 {
                    self.scheme.success
                } else if ping.packets_received > 0 {
                    self.scheme.warning
                } else {
                    self.scheme.error
                };
                let mut lines = vec![format!(
                    "Ping results - Successful: {}, Failed: {}, Packet loss: {}",
                    ping.packets_received,
                    ping.packets_failed,
                    self.paint(format!("{}%", format_float(ping.packet_loss_pct)), loss_color)
                )];

                if let (Some(avg), Some(min), Some(max)) =
                    (ping.avg_latency_ms, ping.min_latency_ms, ping.max_latency_ms)
                {
                    lines.push(format!(
                        "Latency - Avg: {}, Min: {}, Max: {}",
                        self.paint_latency(avg),
                        self.paint_latency(min),
                        self.paint_latency(max)
                    ));
                }

                lines.push(format!(
                    "Status: {}",
                    self.paint(ping.status_message.clone(), loss_color)
                ));
                lines
            }
            ProbeDetails::Tcp(tcp) => {
                if result.success {
                    let mut line = format!(
                        "TCP connection to port {} {} - Response time: {}",
                        tcp.port,
                        self.paint("successful".to_string(), self.scheme.success),
                        tcp.response_time_ms
                            .map(|ms| self.paint_latency(ms))
                            .unwrap_or_else(|| "n/a".to_string())
                    );
                    if let Some(code) = tcp.http_status_code {
                        line.push_str(&format!(", HTTP Status: {}", code));
                    }
                    vec![line]
                } else {
                    vec![format!(
                        "TCP connection to port {} {}: {}",
                        tcp.port,
                        self.paint("failed".to_string(), self.scheme.error),
                        self.error_text(result)
                    )]
                }
            }
        }
    }

    fn error_text(&self, result: &ProbeResult) -> String {
        result.error.clone().unwrap_or_else(|| "unknown error".to_string())
    }

    pub fn saved_line(&self, path: &Path) -> String {
        format!("Results saved to: {}", self.paint(path.display().to_string(), self.scheme.success))
    }
}

impl ProgressReporter for ConsoleReporter {
    fn run_started(&self, host: &Hostname) {
        println!("{}", self.start_line(host));
    }

    fn probe_started(&self, step: ProbeStep) {
        println!("{}", self.step_line(step));
    }

    fn probe_finished(&self, result: &ProbeResult) {
        for line in self.result_lines(result) {
            println!("{}", line);
        }
    }
}
