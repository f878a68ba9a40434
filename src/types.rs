//! Type definitions and aliases

use std::fmt;
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Maximum length of a hostname (RFC 1035 presentation format)
pub const MAX_HOSTNAME_LENGTH: usize = 253;

/// A target host that passed validation.
///
/// The host string ends up on the ping command line and inside the HTTP
/// request line, so only `[A-Za-z0-9._-]` is accepted. Probes take a
/// `&Hostname`, which makes it impossible to reach the network with an
/// unvalidated string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hostname(String);

impl Hostname {
    /// Validate a raw, user supplied host string
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(AppError::invalid_host("hostname cannot be empty"));
        }

        if let Some(bad) = raw.chars().find(|c| !is_hostname_char(*c)) {
            return Err(AppError::invalid_host(format!(
                "Invalid hostname format: {} (unexpected character {:?})",
                raw, bad
            )));
        }

        if raw.len() > MAX_HOSTNAME_LENGTH {
            return Err(AppError::invalid_host(format!(
                "Hostname too long: {} characters (maximum {})",
                raw.len(),
                MAX_HOSTNAME_LENGTH
            )));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_hostname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Hostname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Hostname {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Hostname {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Hostname> for String {
    fn from(host: Hostname) -> Self {
        host.0
    }
}

/// The three probe layers, in the order a session runs them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProbeKind {
    Dns,
    Ping,
    Tcp,
}

impl ProbeKind {
    /// Section title used in the report
    pub fn title(&self) -> &'static str {
        match self {
            ProbeKind::Dns => "DNS Resolution",
            ProbeKind::Ping => "Ping Test",
            ProbeKind::Tcp => "TCP Connection",
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
