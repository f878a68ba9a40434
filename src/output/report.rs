//! Plain-text report rendering

use crate::models::{DnsDetails, PingDetails, ProbeDetails, ProbeResult, TcpDetails};
use chrono::{DateTime, TimeZone};
use std::fmt::{Display, Write as _};

/// Timestamp layout used throughout the report
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const HEADER_RULE_WIDTH: usize = 60;
const SECTION_RULE_WIDTH: usize = 40;

/// Shortest representation of `value` that keeps at least one decimal
/// (`12.0`, `12.35`, `0.412`)
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map(format_float).unwrap_or_else(|| "None".to_string())
}

/// Render the report for `host`. Results appear in the given order, one
/// numbered section each.
pub fn render_report<Tz>(host: &str, results: &[ProbeResult], completion_time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    let rule = "=".repeat(HEADER_RULE_WIDTH);

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "NETWORK TEST RESULTS FOR {}", host.to_uppercase());
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Test completed at: {}", completion_time.format(TIMESTAMP_FORMAT));
    out.push('\n');

    for (index, result) in results.iter().enumerate() {
        write_section(&mut out, index + 1, result);
    }

    out
}

fn write_section(out: &mut String, number: usize, result: &ProbeResult) {
    let _ = writeln!(out, "Test {}: {}", number, result.kind().title());
    let _ = writeln!(out, "{}", "-".repeat(SECTION_RULE_WIDTH));
    let _ = writeln!(out, "Timestamp: {}", result.timestamp.format(TIMESTAMP_FORMAT));
    let _ = writeln!(out, "Status: {}", result.status_label());

    match &result.details {
        ProbeDetails::Dns(details) => write_dns(out, result, details),
        ProbeDetails::Ping(details) => write_ping(out, result, details),
        ProbeDetails::Tcp(details) => write_tcp(out, result, details),
    }

    out.push('\n');
}

fn write_error(out: &mut String, result: &ProbeResult) {
    let _ = writeln!(out, "Error: {}", result.error.as_deref().unwrap_or("unknown error"));
}

fn write_dns(out: &mut String, result: &ProbeResult, details: &DnsDetails) {
    if result.success {
        let _ = writeln!(out, "Hostname: {}", details.hostname);
        let _ = writeln!(out, "Resolved IP: {}", details.resolved_address.as_deref().unwrap_or("None"));
        let _ = writeln!(out, "Response Time: {}ms", format_optional(details.response_time_ms));
    } else {
        write_error(out, result);
    }
}

fn write_ping(out: &mut String, result: &ProbeResult, details: &PingDetails) {
    if result.success {
        let _ = writeln!(out, "Packets Sent: {}", details.packets_sent);
        let _ = writeln!(out, "Packets Received: {}", details.packets_received);
        let _ = writeln!(out, "Packet Loss: {}%", format_float(details.packet_loss_pct));
        let _ = writeln!(out, "Min Latency: {}ms", format_optional(details.min_latency_ms));
        let _ = writeln!(out, "Max Latency: {}ms", format_optional(details.max_latency_ms));
        let _ = writeln!(out, "Avg Latency: {}ms", format_optional(details.avg_latency_ms));
    } else {
        write_error(out, result);
    }
}

fn write_tcp(out: &mut String, result: &ProbeResult, details: &TcpDetails) {
    let _ = writeln!(out, "Port: {}", details.port);
    if result.success {
        let _ = writeln!(out, "Response Time: {}ms", format_optional(details.response_time_ms));
        if let Some(code) = details.http_status_code {
            let _ = writeln!(out, "HTTP Status Code: {}", code);
        }
    } else {
        write_error(out, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PingDetails;
    use crate::stats::LatencySummary;
    use chrono::{Local, TimeZone};

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, h, m, s).unwrap()
    }

    fn sample_results() -> Vec<ProbeResult> {
        let ping = PingDetails {
            packets_sent: 4,
            packets_received: 4,
            packets_failed: 0,
            packet_loss_pct: 0.0,
            min_latency_ms: None,
            max_latency_ms: None,
            avg_latency_ms: None,
            status_message: "All 4 pings successful".to_string(),
        }
        .with_latency(LatencySummary::from_samples(&[11.8, 12.3, 12.5, 12.0]));

        vec![
            ProbeResult::dns_success("dns.google", "8.8.8.8".to_string(), 15.0).with_timestamp(at(10, 0, 1)),
            ProbeResult::ping(true, ping).with_timestamp(at(10, 0, 2)),
            ProbeResult::tcp_success(443, 12.35, Some(301)).with_timestamp(at(10, 0, 6)),
            ProbeResult::tcp_failure(22, "Connection refused (os error 111)".to_string())
                .with_timestamp(at(10, 0, 7)),
        ]
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(15.0), "15.0");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(12.35), "12.35");
        assert_eq!(format_float(33.3), "33.3");
        assert_eq!(format_float(0.41), "0.41");
    }

    #[test]
    fn test_full_report_layout() {
        let report = render_report("dns.google", &sample_results(), &at(10, 0, 8));

        let expected = "\
============================================================
NETWORK TEST RESULTS FOR DNS.GOOGLE
============================================================
Test completed at: 2024-03-09 10:00:08

Test 1: DNS Resolution
----------------------------------------
Timestamp: 2024-03-09 10:00:01
Status: PASS
Hostname: dns.google
Resolved IP: 8.8.8.8
Response Time: 15.0ms

Test 2: Ping Test
----------------------------------------
Timestamp: 2024-03-09 10:00:02
Status: PASS
Packets Sent: 4
Packets Received: 4
Packet Loss: 0.0%
Min Latency: 11.8ms
Max Latency: 12.5ms
Avg Latency: 12.15ms

Test 3: TCP Connection
----------------------------------------
Timestamp: 2024-03-09 10:00:06
Status: PASS
Port: 443
Response Time: 12.35ms
HTTP Status Code: 301

Test 4: TCP Connection
----------------------------------------
Timestamp: 2024-03-09 10:00:07
Status: FAIL
Port: 22
Error: Connection refused (os error 111)

";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_failed_dns_only_report() {
        let results = vec![ProbeResult::dns_failure(
            "nonexistent.invalid",
            "DNS resolution failed: NXDOMAIN".to_string(),
        )
        .with_timestamp(at(9, 30, 0))];

        let report = render_report("nonexistent.invalid", &results, &at(9, 30, 1));
        assert!(report.contains("NETWORK TEST RESULTS FOR NONEXISTENT.INVALID\n"));
        assert!(report.contains("Test 1: DNS Resolution\n"));
        assert!(report.contains("Status: FAIL\nError: DNS resolution failed: NXDOMAIN\n\n"));
        assert!(!report.contains("Test 2"));
        assert!(!report.contains("Hostname:"));
    }

    #[test]
    fn test_failed_ping_shows_only_error() {
        let results = vec![ProbeResult::ping(
            false,
            PingDetails::total_loss(4, "Partial failure: 3 successful, 1 failed".to_string()),
        )
        .with_timestamp(at(9, 0, 0))];

        let report = render_report("example.com", &results, &at(9, 0, 5));
        assert!(report.contains("Status: FAIL\nError: Partial failure: 3 successful, 1 failed\n"));
        assert!(!report.contains("Packets Sent"));
    }

    #[test]
    fn test_tcp_without_status_code() {
        let results = vec![ProbeResult::tcp_success(53, 20.0, None).with_timestamp(at(9, 0, 0))];
        let report = render_report("8.8.8.8", &results, &at(9, 0, 1));
        assert!(report.contains("Port: 53\nResponse Time: 20.0ms\n\n"));
        assert!(!report.contains("HTTP Status Code"));
    }

    #[test]
    fn test_rendering_is_deterministic_and_ordered() {
        let mut results = sample_results();
        let first = render_report("dns.google", &results, &at(10, 0, 8));
        assert_eq!(first, render_report("dns.google", &results, &at(10, 0, 8)));

        results.swap(2, 3);
        let swapped = render_report("dns.google", &results, &at(10, 0, 8));
        let port_22 = swapped.find("Port: 22").unwrap();
        let port_443 = swapped.find("Port: 443").unwrap();
        assert!(port_22 < port_443);
        assert!(swapped.contains("Test 3: TCP Connection\n----------------------------------------\nTimestamp: 2024-03-09 10:00:07"));
    }

    #[test]
    fn test_empty_results_render_header_only() {
        let report = render_report("host", &[], &at(0, 0, 0));
        assert!(report.ends_with("Test completed at: 2024-03-09 00:00:00\n\n"));
    }
}
