//! Advisory configuration checks
//!
//! `Config::validate` rejects settings that cannot run. The checks here
//! never fail a run; they flag settings that are legal but probably not
//! what the user meant.

use crate::{
    error::Result,
    models::Config,
};
use colored::{Color, Colorize};
use std::collections::HashSet;
use std::net::IpAddr;
use std::path::Path;

/// Ping counts above this take long enough to deserve a note
const HIGH_PING_COUNT: u32 = 100;
/// Connect timeouts above this slow down failure detection noticeably
const LONG_TCP_TIMEOUT_SECS: u64 = 60;

/// Configuration validator with advisory rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Run `Config::validate` and then collect advisory warnings
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();
        warnings.extend(Self::check_target(&config.target_host));
        warnings.extend(Self::check_ports(&config.tcp_ports));
        warnings.extend(Self::check_timing(config));
        warnings.extend(Self::check_output(&config.output_file));

        Ok(warnings)
    }

    fn check_target(host: &str) -> Vec<ValidationWarning> {
        let Ok(ip) = host.trim().parse::<IpAddr>() else {
            return Vec::new();
        };

        let local = match ip {
            IpAddr::V4(v4) => v4.is_private() || v4.is_loopback() || v4.is_link_local(),
            IpAddr::V6(v6) => v6.is_loopback(),
        };

        if local {
            vec![ValidationWarning::new(
                ValidationLevel::Info,
                format!("Target {} is a private or loopback address", ip),
            )]
        } else {
            Vec::new()
        }
    }

    fn check_ports(ports: &[u16]) -> Vec<ValidationWarning> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();

        ports
            .iter()
            .filter(|&&port| !seen.insert(port) && reported.insert(port))
            .map(|port| {
                ValidationWarning::new(
                    ValidationLevel::Warning,
                    format!("Port {} is listed more than once and will be probed repeatedly", port),
                )
            })
            .collect()
    }

    fn check_timing(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.ping_count > HIGH_PING_COUNT {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!(
                    "High ping count of {} will take roughly {} seconds",
                    config.ping_count, config.ping_count
                ),
            ));
        }

        if config.tcp_timeout_seconds > LONG_TCP_TIMEOUT_SECS {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!(
                    "Long timeout of {}s will slow down failure detection",
                    config.tcp_timeout_seconds
                ),
            ));
        }

        warnings
    }

    fn check_output(output_file: &str) -> Vec<ValidationWarning> {
        let path = Path::new(output_file.trim());
        if path.components().count() > 1 {
            vec![ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Output file '{}' contains directory components; only the file name is used",
                    output_file
                ),
            )]
        } else {
            Vec::new()
        }
    }
}

/// Validation warning levels
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationLevel {
    Info,
    Warning,
    Error,
}

impl ValidationLevel {
    /// Get display string for level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }

    /// Get color for terminal display
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// Configuration validation warning
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    /// Create a new validation warning
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }

    /// Format warning for display
    pub fn format(&self, use_color: bool) -> String {
        let tag = format!("[{}]", self.level.as_str());
        if use_color {
            format!("{} {}", tag.color(self.level.color()).bold(), self.message)
        } else {
            format!("{} {}", tag, self.message)
        }
    }
}

/// Convenience function for comprehensive configuration validation
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}
