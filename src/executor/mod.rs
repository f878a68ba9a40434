//! Test execution engine
//!
//! Runs the probes for one host in a fixed order (DNS, ping, then one TCP
//! connect per port) and appends each outcome to the session. A failed DNS
//! lookup ends the run: nothing else can reach a host without an address.

use crate::{
    dns::DnsProbe,
    logging::{Logger, ProbeLogger},
    models::{Config, ProbeResult, TestSession},
    ping::PingProbe,
    tcp::TcpProbe,
    types::Hostname,
};
use serde::{Deserialize, Serialize};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

/// The probe about to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStep {
    Dns,
    Ping { count: u32 },
    Tcp { port: u16 },
}

/// Observer notified as the run progresses
pub trait ProgressReporter: Send + Sync {
    /// Called once before the first probe
    fn run_started(&self, _host: &Hostname) {}

    /// Called before each probe
    fn probe_started(&self, _step: ProbeStep) {}

    /// Called right after each result is appended to the session
    fn probe_finished(&self, _result: &ProbeResult) {}
}

/// Basic execution configuration for the test executor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// TCP ports to probe, in order
    pub tcp_ports: Vec<u16>,
    /// Number of echo requests
    pub ping_count: u32,
    /// Timeout for each TCP connect
    pub tcp_timeout: Duration,
}

impl From<&Config> for ExecutionConfig {
    fn from(config: &Config) -> Self {
        Self {
            tcp_ports: config.tcp_ports.clone(),
            ping_count: config.ping_count,
            tcp_timeout: config.tcp_timeout(),
        }
    }
}

/// Summary of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    /// Total execution duration
    pub total_duration: Duration,
    /// Number of probes executed
    pub total_tests: usize,
    /// Number of passing probes
    pub passed_tests: usize,
    /// Number of failing probes
    pub failed_tests: usize,
    /// Whether ping and TCP were skipped because DNS failed
    pub dns_short_circuited: bool,
}

/// Sequential probe runner
pub struct TestExecutor {
    dns: DnsProbe,
    ping: PingProbe,
    tcp: TcpProbe,
    logger: ProbeLogger,
    reporter: Option<Arc<dyn ProgressReporter>>,
}

impl TestExecutor {
    /// Executor over the given probes, with logging disabled
    pub fn new(dns: DnsProbe, ping: PingProbe, tcp: TcpProbe) -> Self {
        Self {
            dns,
            ping,
            tcp,
            logger: ProbeLogger::from_logger(Logger::disabled()),
            reporter: None,
        }
    }

    /// Executor over the system resolver, system ping and real sockets
    pub fn system(config: &Config) -> Self {
        let exec_config = ExecutionConfig::from(config);
        Self::new(
            DnsProbe::system(),
            PingProbe::system(),
            TcpProbe::new(exec_config.tcp_timeout),
        )
    }

    pub fn with_logger(mut self, logger: ProbeLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Run every probe against the session's host.
    ///
    /// Probe failures are recorded, never returned; the summary only
    /// describes what happened.
    pub async fn run(&self, session: &mut TestSession, ports: &[u16], ping_count: u32) -> ExecutionSummary {
        let start = Instant::now();
        let host = session.target_host().clone();
        let correlation_id = self.logger.logger().start_operation("network_tests").await;

        self.logger.log_plan(host.as_str(), ports, ping_count).await;
        if let Some(reporter) = &self.reporter {
            reporter.run_started(&host);
        }

        self.notify_start(ProbeStep::Dns);
        let dns = self.dns.resolve(&host).await;
        let dns_ok = dns.success;
        self.record(session, dns).await;

        if dns_ok {
            self.notify_start(ProbeStep::Ping { count: ping_count });
            let ping = self.ping.ping(&host, ping_count).await;
            self.record(session, ping).await;

            for &port in ports {
                self.notify_start(ProbeStep::Tcp { port });
                let tcp = self.tcp.connect(&host, port).await;
                self.record(session, tcp).await;
            }
        } else {
            self.logger.log_short_circuit(host.as_str()).await;
        }

        let summary = ExecutionSummary {
            total_duration: start.elapsed(),
            total_tests: session.results().len(),
            passed_tests: session.passed_count(),
            failed_tests: session.failed_count(),
            dns_short_circuited: !dns_ok,
        };

        self.logger
            .logger()
            .end_operation(&correlation_id, "network_tests", summary.failed_tests == 0)
            .await;

        summary
    }

    fn notify_start(&self, step: ProbeStep) {
        if let Some(reporter) = &self.reporter {
            reporter.probe_started(step);
        }
    }

    async fn record(&self, session: &mut TestSession, result: ProbeResult) {
        let host = session.target_host().as_str().to_string();
        let recorded = session.record(result);
        if let Some(reporter) = &self.reporter {
            reporter.probe_finished(recorded);
        }
        self.logger.log_result(&host, recorded).await;
    }
}
