//! ICMP reachability probe built on the system ping utility
//!
//! The probe runs `ping` through a [`PingRunner`], extracts one latency
//! sample per reply line and classifies the run three ways: every packet
//! answered, some answered, none answered. Only the first is a pass.

pub mod parser;
pub mod platform;

pub use parser::{parse_latencies, parse_latency_line};
pub use platform::{PingFlavor, PingOutput, PingRunner, SystemPing};

use crate::{
    error::AppError,
    models::{PingDetails, ProbeResult},
    stats::{loss_percentage, LatencySummary},
    types::Hostname,
};
use chrono::Local;
use std::{sync::Arc, time::Duration};

/// Wall-clock budget for a ping run: two seconds per packet plus ten
pub fn ping_timeout(count: u32) -> Duration {
    Duration::from_secs(u64::from(count) * 2 + 10)
}

/// Aggregate parsed samples into a ping result.
///
/// `stderr_note` is appended to the total-failure message; callers pass it
/// only when the utility exited non-zero and wrote to stderr.
pub fn classify(count: u32, samples: &[f64], stderr_note: Option<&str>) -> ProbeResult {
    let received = samples.len().min(count as usize) as u32;
    let failed = count - received;
    let samples = &samples[..received as usize];

    let (success, status_message) = if received == count {
        (true, format!("All {} pings successful", count))
    } else if received > 0 {
        (
            false,
            format!("Partial failure: {} successful, {} failed", received, failed),
        )
    } else {
        let mut message = format!("All {} pings failed", count);
        if let Some(note) = stderr_note {
            message.push_str(" - ");
            message.push_str(note);
        }
        (false, message)
    };

    let details = PingDetails {
        packets_sent: count,
        packets_received: received,
        packets_failed: failed,
        packet_loss_pct: loss_percentage(failed, count),
        min_latency_ms: None,
        max_latency_ms: None,
        avg_latency_ms: None,
        status_message,
    }
    .with_latency(LatencySummary::from_samples(samples));

    ProbeResult::ping(success, details)
}

/// Ping probe producing a `ProbeResult`
#[derive(Clone)]
pub struct PingProbe {
    runner: Arc<dyn PingRunner>,
}

impl PingProbe {
    pub fn new(runner: Arc<dyn PingRunner>) -> Self {
        Self { runner }
    }

    /// Probe using the platform's ping utility
    pub fn system() -> Self {
        Self::new(Arc::new(SystemPing::new()))
    }

    /// Send `count` echo requests. Never fails: timeouts and process
    /// errors are reported as a total loss.
    pub async fn ping(&self, host: &Hostname, count: u32) -> ProbeResult {
        let started_at = Local::now();

        let result = match self.runner.run_ping(host, count, ping_timeout(count)).await {
            Ok(output) => {
                let samples = parse_latencies(&output.parse_text());
                let stderr = output.stderr.trim();
                let stderr_note = (!output.succeeded() && !stderr.is_empty()).then_some(stderr);
                classify(count, &samples, stderr_note)
            }
            Err(AppError::Timeout(_)) => ProbeResult::ping(
                false,
                PingDetails::total_loss(
                    count,
                    format!("Ping test timed out - All {} pings failed", count),
                ),
            ),
            Err(e) => ProbeResult::ping(
                false,
                PingDetails::total_loss(
                    count,
                    format!("Ping test error: {} - All {} pings failed", e.detail(), count),
                ),
            ),
        };

        result.with_timestamp(started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use proptest::collection::vec;
    use std::sync::Mutex;

    /// Replays a canned outcome and records the requested timeout
    struct FakeRunner {
        outcome: fn() -> Result<PingOutput>,
        seen_timeout: Mutex<Option<Duration>>,
    }

    impl FakeRunner {
        fn new(outcome: fn() -> Result<PingOutput>) -> Self {
            Self { outcome, seen_timeout: Mutex::new(None) }
        }
    }

    #[async_trait]
    impl PingRunner for FakeRunner {
        async fn run_ping(&self, _host: &Hostname, _count: u32, timeout: Duration) -> Result<PingOutput> {
            *self.seen_timeout.lock().unwrap() = Some(timeout);
            (self.outcome)()
        }
    }

    fn host() -> Hostname {
        Hostname::parse("example.com").unwrap()
    }

    fn reply(ms: &str) -> String {
        format!("64 bytes from 93.184.216.34: icmp_seq=1 ttl=56 time={} ms\n", ms)
    }

    #[test]
    fn test_ping_timeout_budget() {
        assert_eq!(ping_timeout(1), Duration::from_secs(12));
        assert_eq!(ping_timeout(4), Duration::from_secs(18));
        assert_eq!(ping_timeout(1000), Duration::from_secs(2010));
    }

    #[test]
    fn test_classify_full_success() {
        let result = classify(4, &[10.0, 20.0, 30.0, 40.0], None);
        assert!(result.success);
        assert!(result.error.is_none());

        let details = result.as_ping().unwrap();
        assert_eq!(details.packets_received, 4);
        assert_eq!(details.packets_failed, 0);
        assert_eq!(details.packet_loss_pct, 0.0);
        assert_eq!(details.min_latency_ms, Some(10.0));
        assert_eq!(details.max_latency_ms, Some(40.0));
        assert_eq!(details.avg_latency_ms, Some(25.0));
        assert_eq!(details.status_message, "All 4 pings successful");
    }

    #[test]
    fn test_classify_partial_failure() {
        let result = classify(3, &[5.0, 7.0], Some("ignored for partial runs"));
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Partial failure: 2 successful, 1 failed"));

        let details = result.as_ping().unwrap();
        assert_eq!(details.packet_loss_pct, 33.3);
        assert_eq!(details.avg_latency_ms, Some(6.0));
    }

    #[test]
    fn test_classify_single_reply_is_partial() {
        let result = classify(4, &[1.0], None);
        assert!(!result.success);
        assert_eq!(result.as_ping().unwrap().packet_loss_pct, 75.0);
    }

    #[test]
    fn test_classify_total_failure() {
        let result = classify(4, &[], None);
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("All 4 pings failed"));

        let details = result.as_ping().unwrap();
        assert_eq!(details.packet_loss_pct, 100.0);
        assert!(details.min_latency_ms.is_none());
        assert!(details.avg_latency_ms.is_none());

        let with_note = classify(2, &[], Some("ping: unknown host"));
        assert_eq!(with_note.error.as_deref(), Some("All 2 pings failed - ping: unknown host"));
    }

    #[test]
    fn test_classify_ignores_surplus_samples() {
        let result = classify(2, &[1.0, 2.0, 100.0], None);
        let details = result.as_ping().unwrap();
        assert!(result.success);
        assert_eq!(details.packets_received, 2);
        assert_eq!(details.packets_failed, 0);
        assert_eq!(details.max_latency_ms, Some(2.0));
    }

    #[tokio::test]
    async fn test_probe_parses_output_even_on_nonzero_exit() {
        let runner = Arc::new(FakeRunner::new(|| Ok(PingOutput {
            exit_code: Some(1),
            stdout: format!("{}{}Request timeout for icmp_seq 2\n", reply("10.5"), reply("11.5")),
            stderr: String::new(),
        })));
        let probe = PingProbe::new(runner.clone());

        let result = probe.ping(&host(), 3).await;
        let details = result.as_ping().unwrap();
        assert_eq!(details.packets_sent, 3);
        assert_eq!(details.packets_received, 2);
        assert_eq!(details.avg_latency_ms, Some(11.0));
        assert!(!result.success);
        assert_eq!(*runner.seen_timeout.lock().unwrap(), Some(Duration::from_secs(16)));
    }

    #[tokio::test]
    async fn test_probe_appends_stderr_on_total_failure() {
        let probe = PingProbe::new(Arc::new(FakeRunner::new(|| Ok(PingOutput {
            exit_code: Some(2),
            stdout: String::new(),
            stderr: "ping: example.com: Name or service not known\n".to_string(),
        }))));

        let result = probe.ping(&host(), 4).await;
        assert_eq!(
            result.error.as_deref(),
            Some("All 4 pings failed - ping: example.com: Name or service not known")
        );
    }

    #[tokio::test]
    async fn test_probe_success_ignores_stderr() {
        let probe = PingProbe::new(Arc::new(FakeRunner::new(|| Ok(PingOutput {
            exit_code: Some(0),
            stdout: reply("1.25"),
            stderr: "warning: something harmless\n".to_string(),
        }))));

        let result = probe.ping(&host(), 1).await;
        assert!(result.success);
        assert_eq!(result.as_ping().unwrap().min_latency_ms, Some(1.25));
    }

    #[tokio::test]
    async fn test_probe_timeout_is_total_loss() {
        let probe = PingProbe::new(Arc::new(FakeRunner::new(|| {
            Err(AppError::timeout("ping did not finish within 18s"))
        })));

        let result = probe.ping(&host(), 4).await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Ping test timed out - All 4 pings failed"));
        let details = result.as_ping().unwrap();
        assert_eq!(details.packets_failed, 4);
        assert_eq!(details.packet_loss_pct, 100.0);
    }

    #[tokio::test]
    async fn test_probe_process_error_is_total_loss() {
        let probe = PingProbe::new(Arc::new(FakeRunner::new(|| {
            Err(AppError::process("failed to start ping: No such file or directory"))
        })));

        let result = probe.ping(&host(), 2).await;
        assert_eq!(
            result.error.as_deref(),
            Some("Ping test error: failed to start ping: No such file or directory - All 2 pings failed")
        );
    }

    proptest! {
        /// Received plus failed always equals sent, loss matches the formula
        #[test]
        fn packet_accounting_holds(count in 1u32..=1000, samples in vec(0.01f64..5000.0, 0..1100)) {
            let result = classify(count, &samples, None);
            let details = result.as_ping().unwrap();

            prop_assert_eq!(details.packets_sent, count);
            prop_assert_eq!(details.packets_received + details.packets_failed, count);
            let exact_loss = 100.0 * details.packets_failed as f64 / count as f64;
            prop_assert!((details.packet_loss_pct - exact_loss).abs() <= 0.05 + 1e-9);
            prop_assert_eq!(details.packet_loss_pct, (details.packet_loss_pct * 10.0).round() / 10.0);
        }

        /// Exactly one of the three outcomes applies
        #[test]
        fn classification_is_three_way(count in 1u32..=50, received in 0u32..=50) {
            let received = received.min(count);
            let samples = vec![1.0; received as usize];
            let result = classify(count, &samples, None);
            let message = result.as_ping().unwrap().status_message.clone();

            if received == count {
                prop_assert!(result.success);
                prop_assert!(message.starts_with("All") && message.ends_with("successful"));
            } else if received > 0 {
                prop_assert!(!result.success);
                prop_assert!(message.starts_with("Partial failure"));
            } else {
                prop_assert!(!result.success);
                prop_assert!(message.ends_with("pings failed"));
            }
        }
    }
}
