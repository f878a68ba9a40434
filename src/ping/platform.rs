//! Platform-specific invocation of the system ping utility
//!
//! Windows-family `ping` takes the echo count as `-n`, every other
//! platform we care about (Linux, macOS, BSD, busybox) uses `-c`.

use crate::{
    error::{AppError, Result},
    types::Hostname,
};
use async_trait::async_trait;
use std::{process::Stdio, time::Duration};
use tokio::process::Command;

/// Captured output of one ping run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PingOutput {
    /// Exit code; `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl PingOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Text to scan for replies: stdout, plus stderr after a non-zero exit
    pub fn parse_text(&self) -> String {
        if self.succeeded() {
            self.stdout.clone()
        } else {
            format!("{}{}", self.stdout, self.stderr)
        }
    }
}

/// Capability to run an ICMP echo test against a host.
///
/// Implementations must return `AppError::Timeout` when `timeout` elapses
/// and release the underlying process on every path.
#[async_trait]
pub trait PingRunner: Send + Sync {
    async fn run_ping(&self, host: &Hostname, count: u32, timeout: Duration) -> Result<PingOutput>;
}

/// Command line dialect of the ping utility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingFlavor {
    /// Linux, macOS, BSD: `ping -c <count> <host>`
    Unix,
    /// Windows: `ping -n <count> <host>`
    Windows,
}

impl PingFlavor {
    /// Dialect of the platform this binary was built for
    pub fn for_current_platform() -> Self {
        #[cfg(target_os = "windows")]
        {
            PingFlavor::Windows
        }
        #[cfg(not(target_os = "windows"))]
        {
            PingFlavor::Unix
        }
    }

    pub fn count_flag(&self) -> &'static str {
        match self {
            PingFlavor::Unix => "-c",
            PingFlavor::Windows => "-n",
        }
    }
}

/// `PingRunner` that spawns the system `ping` binary
#[derive(Debug, Clone)]
pub struct SystemPing {
    program: String,
    flavor: PingFlavor,
}

impl SystemPing {
    /// `ping` from `PATH` with the current platform's dialect
    pub fn new() -> Self {
        Self::with_program("ping", PingFlavor::for_current_platform())
    }

    /// Use a specific executable and dialect
    pub fn with_program<S: Into<String>>(program: S, flavor: PingFlavor) -> Self {
        Self {
            program: program.into(),
            flavor,
        }
    }

    pub fn flavor(&self) -> PingFlavor {
        self.flavor
    }

    /// Arguments passed to the executable
    pub fn args(&self, host: &Hostname, count: u32) -> Vec<String> {
        vec![
            self.flavor.count_flag().to_string(),
            count.to_string(),
            host.as_str().to_string(),
        ]
    }
}

impl Default for SystemPing {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PingRunner for SystemPing {
    async fn run_ping(&self, host: &Hostname, count: u32, timeout: Duration) -> Result<PingOutput> {
        let mut command = Command::new(&self.program);
        command
            .args(self.args(host, count))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command
            .spawn()
            .map_err(|e| AppError::process(format!("failed to start {}: {}", self.program, e)))?;

        // Dropping the wait future on timeout drops the child, which kills it.
        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(PingOutput {
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
            Ok(Err(e)) => Err(AppError::process(format!("failed to collect {} output: {}", self.program, e))),
            Err(_) => Err(AppError::timeout(format!(
                "{} did not finish within {}s",
                self.program,
                timeout.as_secs()
            ))),
        }
    }
}
