//! Test session: the ordered results for one target in one invocation

use super::probe::ProbeResult;
use crate::types::Hostname;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Results for one target host, in execution order.
///
/// Only the executor appends to a session; everything else gets a shared
/// reference once the run is over.
#[derive(Debug, Clone, Serialize)]
pub struct TestSession {
    target_host: Hostname,
    output_path: PathBuf,
    results: Vec<ProbeResult>,
}

impl TestSession {
    pub fn new(target_host: Hostname, output_path: PathBuf) -> Self {
        Self {
            target_host,
            output_path,
            results: Vec::new(),
        }
    }

    pub fn target_host(&self) -> &Hostname {
        &self.target_host
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Results in the order the probes ran
    pub fn results(&self) -> &[ProbeResult] {
        &self.results
    }

    pub(crate) fn record(&mut self, result: ProbeResult) -> &ProbeResult {
        self.results.push(result);
        &self.results[self.results.len() - 1]
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.len() - self.passed_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_order() {
        let host = Hostname::parse("example.com").unwrap();
        let mut session = TestSession::new(host, PathBuf::from("output/report.txt"));
        session.record(ProbeResult::dns_success("example.com", "1.2.3.4".to_string(), 1.0));
        session.record(ProbeResult::tcp_failure(22, "refused".to_string()));
        session.record(ProbeResult::tcp_success(80, 3.0, None));

        let ports: Vec<Option<u16>> = session.results().iter()
            .map(|r| r.as_tcp().map(|t| t.port))
            .collect();
        assert_eq!(ports, vec![None, Some(22), Some(80)]);
        assert_eq!(session.passed_count(), 2);
        assert_eq!(session.failed_count(), 1);
        assert_eq!(session.output_path(), Path::new("output/report.txt"));
    }
}
