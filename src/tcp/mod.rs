//! TCP connectivity probe
//!
//! A probe is one connect attempt bounded by the configured timeout. When
//! the port is a well-known HTTP port the open connection is reused for a
//! best-effort HEAD request (through TLS on HTTPS ports) to record the
//! server's status code. That enrichment never changes the outcome of the
//! connect.

pub mod http;

pub use http::{head_request, parse_status_line, probe_http_status};

use crate::{
    defaults::{DEFAULT_TCP_TIMEOUT, HTTP_PORTS, TLS_PORTS},
    models::ProbeResult,
    stats::duration_ms,
    types::Hostname,
};
use chrono::Local;
use std::time::{Duration, Instant};
use tokio::{net::TcpStream, time::timeout};
use tokio_native_tls::TlsConnector;

/// TCP probe producing a `ProbeResult`
#[derive(Clone)]
pub struct TcpProbe {
    timeout: Duration,
    http_ports: Vec<u16>,
    tls_ports: Vec<u16>,
    // None when the platform TLS backend could not be initialised
    tls: Option<TlsConnector>,
}

impl std::fmt::Debug for TcpProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcpProbe")
            .field("timeout", &self.timeout)
            .field("http_ports", &self.http_ports)
            .field("tls_ports", &self.tls_ports)
            .field("tls", &self.tls.is_some())
            .finish()
    }
}

impl TcpProbe {
    /// Probe with the given connect timeout and the default HTTP ports
    pub fn new(timeout: Duration) -> Self {
        let tls = native_tls::TlsConnector::new().ok().map(TlsConnector::from);

        Self {
            timeout,
            http_ports: HTTP_PORTS.to_vec(),
            tls_ports: TLS_PORTS.to_vec(),
            tls,
        }
    }

    /// Override which ports get the HTTP status check, and which of those
    /// speak TLS
    pub fn with_http_ports(mut self, http_ports: &[u16], tls_ports: &[u16]) -> Self {
        self.http_ports = http_ports.to_vec();
        self.tls_ports = tls_ports.to_vec();
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_http_port(&self, port: u16) -> bool {
        self.http_ports.contains(&port)
    }

    /// Connect to `host:port`. Never fails: refusal, unreachable networks
    /// and timeouts become the result's `error`.
    pub async fn connect(&self, host: &Hostname, port: u16) -> ProbeResult {
        let started_at = Local::now();
        let start = Instant::now();

        let result = match timeout(self.timeout, TcpStream::connect((host.as_str(), port))).await {
            Ok(Ok(stream)) => {
                let response_time = duration_ms(start.elapsed());
                let status = if self.is_http_port(port) {
                    self.http_status(host, port, stream).await
                } else {
                    None
                };
                ProbeResult::tcp_success(port, response_time, status)
            }
            Ok(Err(e)) => ProbeResult::tcp_failure(port, e.to_string()),
            Err(_) => ProbeResult::tcp_failure(
                port,
                format!("Connection timed out after {}s", self.timeout.as_secs()),
            ),
        };

        result.with_timestamp(started_at)
    }

    async fn http_status(&self, host: &Hostname, port: u16, stream: TcpStream) -> Option<u16> {
        let exchange = async {
            if self.tls_ports.contains(&port) {
                let connector = self.tls.as_ref()?;
                let tls_stream = connector.connect(host.as_str(), stream).await.ok()?;
                probe_http_status(tls_stream, host).await
            } else {
                probe_http_status(stream, host).await
            }
        };

        timeout(self.timeout, exchange).await.ok().flatten()
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(DEFAULT_TCP_TIMEOUT)
    }
}
