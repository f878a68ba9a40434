//! Configuration data model and validation

use crate::defaults;
use crate::types::{AppError, Hostname, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Raw target host as given by the user (validated separately)
    #[serde(default)]
    pub target_host: String,

    /// Report file name; only its base name is used
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Directory the report is written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// TCP ports to probe, in order
    #[serde(default = "default_tcp_ports")]
    pub tcp_ports: Vec<u16>,

    /// Number of ICMP echo requests
    #[serde(default = "default_ping_count")]
    pub ping_count: u32,

    /// TCP connect timeout in seconds
    #[serde(default = "default_tcp_timeout_secs")]
    pub tcp_timeout_seconds: u64,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_host: String::new(),
            output_file: default_output_file(),
            output_dir: default_output_dir(),
            tcp_ports: default_tcp_ports(),
            ping_count: default_ping_count(),
            tcp_timeout_seconds: default_tcp_timeout_secs(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// TCP connect timeout as Duration
    pub fn tcp_timeout(&self) -> Duration {
        Duration::from_secs(self.tcp_timeout_seconds)
    }

    /// Validated target host
    pub fn hostname(&self) -> Result<Hostname> {
        Hostname::parse(&self.target_host)
    }

    /// Validate the numeric and file settings
    pub fn validate(&self) -> Result<()> {
        if !(defaults::MIN_PING_COUNT..=defaults::MAX_PING_COUNT).contains(&self.ping_count) {
            return Err(AppError::validation(format!(
                "Ping count must be between {} and {}, got: {}",
                defaults::MIN_PING_COUNT,
                defaults::MAX_PING_COUNT,
                self.ping_count
            )));
        }

        if self.tcp_ports.is_empty() {
            return Err(AppError::validation("At least one TCP port must be specified"));
        }

        if let Some(port) = self.tcp_ports.iter().find(|&&p| p == 0) {
            return Err(AppError::validation(format!(
                "Invalid port number: {}. Must be between 1 and 65535",
                port
            )));
        }

        if self.tcp_timeout_seconds == 0 {
            return Err(AppError::config("TCP timeout must be greater than 0"));
        }

        if self.tcp_timeout_seconds > defaults::MAX_TCP_TIMEOUT_SECS {
            return Err(AppError::config(format!(
                "TCP timeout cannot exceed {} seconds",
                defaults::MAX_TCP_TIMEOUT_SECS
            )));
        }

        if self.output_file.trim().is_empty() {
            return Err(AppError::config("Output file name cannot be empty"));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(ports) = std::env::var("TCP_PORTS") {
            self.tcp_ports = parse_port_list(&ports)
                .map_err(|e| AppError::config(format!("Invalid TCP_PORTS value '{}': {}", ports, e)))?;
        }

        if let Ok(count) = std::env::var("PING_COUNT") {
            self.ping_count = count.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid PING_COUNT value '{}': {}", count, e)))?;
        }

        if let Ok(timeout) = std::env::var("TCP_TIMEOUT_SECONDS") {
            self.tcp_timeout_seconds = timeout.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid TCP_TIMEOUT_SECONDS value '{}': {}", timeout, e)))?;
        }

        if let Ok(output_file) = std::env::var("OUTPUT_FILE") {
            self.output_file = output_file.trim().to_string();
        }

        if let Ok(output_dir) = std::env::var("OUTPUT_DIR") {
            self.output_dir = PathBuf::from(output_dir.trim());
        }

        if let Ok(enable_color) = std::env::var("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

/// Parse a comma or whitespace separated list of ports
pub fn parse_port_list(value: &str) -> Result<Vec<u16>> {
    let mut ports = Vec::new();
    for token in value.split(|c: char| c == ',' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        let port: u16 = token.parse()?;
        if port == 0 {
            return Err(AppError::validation("port 0 is not allowed"));
        }
        ports.push(port);
    }

    if ports.is_empty() {
        return Err(AppError::validation("no ports given"));
    }

    Ok(ports)
}

fn default_output_file() -> String {
    defaults::DEFAULT_OUTPUT_FILE.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_OUTPUT_DIR)
}

fn default_tcp_ports() -> Vec<u16> {
    defaults::DEFAULT_TCP_PORTS.to_vec()
}

fn default_ping_count() -> u32 {
    defaults::DEFAULT_PING_COUNT
}

fn default_tcp_timeout_secs() -> u64 {
    defaults::DEFAULT_TCP_TIMEOUT.as_secs()
}

fn default_enable_color() -> bool {
    defaults::DEFAULT_ENABLE_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output_file, "network_test_results.txt");
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.tcp_ports, vec![80, 443]);
        assert_eq!(config.ping_count, 4);
        assert_eq!(config.tcp_timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ping_count_bounds() {
        let mut config = Config::default();
        config.ping_count = 0;
        assert!(config.validate().is_err());
        config.ping_count = 1001;
        assert!(config.validate().is_err());
        config.ping_count = 1;
        assert!(config.validate().is_ok());
        config.ping_count = 1000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_port_validation() {
        let mut config = Config::default();
        config.tcp_ports = vec![];
        assert!(config.validate().is_err());
        config.tcp_ports = vec![80, 0];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid port number: 0"));
        config.tcp_ports = vec![1, 65535];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timeout_and_output_validation() {
        let mut config = Config::default();
        config.tcp_timeout_seconds = 0;
        assert!(config.validate().is_err());
        config.tcp_timeout_seconds = 301;
        assert!(config.validate().is_err());
        config.tcp_timeout_seconds = 5;
        config.output_file = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_hostname_validation_is_separate() {
        let mut config = Config::default();
        config.target_host = "; rm -rf /".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.hostname().unwrap_err().category(), "HOST");

        config.target_host = "example.com".to_string();
        assert_eq!(config.hostname().unwrap().as_str(), "example.com");
    }

    #[test]
    fn test_parse_port_list() {
        assert_eq!(parse_port_list("80,443").unwrap(), vec![80, 443]);
        assert_eq!(parse_port_list("22 80, 8080").unwrap(), vec![22, 80, 8080]);
        assert!(parse_port_list("").is_err());
        assert!(parse_port_list("0").is_err());
        assert!(parse_port_list("70000").is_err());
        assert!(parse_port_list("http").is_err());
    }
}
