//! Probe result data model
//!
//! Every probe, whatever its layer, yields one `ProbeResult`: a common
//! header (timestamp, success flag, optional error) plus kind specific
//! details.

use crate::stats::LatencySummary;
use crate::types::ProbeKind;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Outcome of a single DNS, ping or TCP probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// When the probe was started
    pub timestamp: DateTime<Local>,
    /// Whether the probe passed
    pub success: bool,
    /// Failure description; `None` when the probe passed
    pub error: Option<String>,
    /// Kind specific measurements
    pub details: ProbeDetails,
}

/// Kind specific part of a probe result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeDetails {
    Dns(DnsDetails),
    Ping(PingDetails),
    Tcp(TcpDetails),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsDetails {
    pub hostname: String,
    pub resolved_address: Option<String>,
    pub response_time_ms: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingDetails {
    pub packets_sent: u32,
    pub packets_received: u32,
    pub packets_failed: u32,
    pub packet_loss_pct: f64,
    pub min_latency_ms: Option<f64>,
    pub max_latency_ms: Option<f64>,
    pub avg_latency_ms: Option<f64>,
    /// Human readable classification ("All 4 pings successful", ...)
    pub status_message: String,
}

impl PingDetails {
    /// Details for a run where no reply was parsed at all
    pub fn total_loss(count: u32, status_message: String) -> Self {
        Self {
            packets_sent: count,
            packets_received: 0,
            packets_failed: count,
            packet_loss_pct: 100.0,
            min_latency_ms: None,
            max_latency_ms: None,
            avg_latency_ms: None,
            status_message,
        }
    }

    /// Copy min/max/avg from a latency summary
    pub fn with_latency(mut self, summary: Option<LatencySummary>) -> Self {
        self.min_latency_ms = summary.map(|s| s.min_ms);
        self.max_latency_ms = summary.map(|s| s.max_ms);
        self.avg_latency_ms = summary.map(|s| s.avg_ms);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TcpDetails {
    pub port: u16,
    pub response_time_ms: Option<f64>,
    pub http_status_code: Option<u16>,
}

impl ProbeResult {
    fn new(success: bool, error: Option<String>, details: ProbeDetails) -> Self {
        Self {
            timestamp: Local::now(),
            success,
            error,
            details,
        }
    }

    /// Successful DNS resolution
    pub fn dns_success(hostname: &str, resolved_address: String, response_time_ms: f64) -> Self {
        Self::new(
            true,
            None,
            ProbeDetails::Dns(DnsDetails {
                hostname: hostname.to_string(),
                resolved_address: Some(resolved_address),
                response_time_ms: Some(response_time_ms),
            }),
        )
    }

    /// Failed DNS resolution
    pub fn dns_failure(hostname: &str, error: String) -> Self {
        Self::new(
            false,
            Some(error),
            ProbeDetails::Dns(DnsDetails {
                hostname: hostname.to_string(),
                resolved_address: None,
                response_time_ms: None,
            }),
        )
    }

    /// Ping result; the status message doubles as the error on failure
    pub fn ping(success: bool, details: PingDetails) -> Self {
        let error = if success {
            None
        } else {
            Some(details.status_message.clone())
        };
        Self::new(success, error, ProbeDetails::Ping(details))
    }

    /// Successful TCP connect
    pub fn tcp_success(port: u16, response_time_ms: f64, http_status_code: Option<u16>) -> Self {
        Self::new(
            true,
            None,
            ProbeDetails::Tcp(TcpDetails {
                port,
                response_time_ms: Some(response_time_ms),
                http_status_code,
            }),
        )
    }

    /// Failed TCP connect
    pub fn tcp_failure(port: u16, error: String) -> Self {
        Self::new(
            false,
            Some(error),
            ProbeDetails::Tcp(TcpDetails {
                port,
                response_time_ms: None,
                http_status_code: None,
            }),
        )
    }

    /// Replace the timestamp (used for reproducible reports)
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn kind(&self) -> ProbeKind {
        match self.details {
            ProbeDetails::Dns(_) => ProbeKind::Dns,
            ProbeDetails::Ping(_) => ProbeKind::Ping,
            ProbeDetails::Tcp(_) => ProbeKind::Tcp,
        }
    }

    pub fn as_dns(&self) -> Option<&DnsDetails> {
        match &self.details {
            ProbeDetails::Dns(details) => Some(details),
            _ => None,
        }
    }

    pub fn as_ping(&self) -> Option<&PingDetails> {
        match &self.details {
            ProbeDetails::Ping(details) => Some(details),
            _ => None,
        }
    }

    pub fn as_tcp(&self) -> Option<&TcpDetails> {
        match &self.details {
            ProbeDetails::Tcp(details) => Some(details),
            _ => None,
        }
    }

    /// "PASS" or "FAIL"
    pub fn status_label(&self) -> &'static str {
        if self.success {
            "PASS"
        } else {
            "FAIL"
        }
    }
}
