//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::Result,
    models::Config,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the configuration: defaults, then `.env`, then the process
    /// environment, then command-line flags. The result is validated.
    pub fn parse(&self) -> Result<Config> {
        EnvManager::load_env_file()?;
        self.parse_without_env_file()
    }

    /// Same as `parse` but skips `.env` loading
    pub fn parse_without_env_file(&self) -> Result<Config> {
        let mut config = Config::default();
        config.merge_from_env()?;
        self.apply_cli_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        config.target_host = self.cli.host.clone();

        if let Some(ref output) = self.cli.output {
            config.output_file = output.clone();
        }

        if let Some(ref ports) = self.cli.ports {
            config.tcp_ports = ports.clone();
        }

        if let Some(count) = self.cli.count {
            config.ping_count = count;
        }

        if let Some(timeout) = self.cli.timeout {
            config.tcp_timeout_seconds = timeout;
        }

        if let Some(ref dir) = self.cli.output_dir {
            config.output_dir = dir.clone();
        }

        if let Some(color) = self.cli.color_override() {
            config.enable_color = color;
        }

        // CLI-only flags
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let ports: Vec<String> = config.tcp_ports.iter().map(|p| p.to_string()).collect();

    let summary = [
        format!("Target: {}", config.target_host),
        format!("TCP Ports: {}", ports.join(", ")),
        format!("Ping Count: {}", config.ping_count),
        format!("TCP Timeout: {}s", config.tcp_timeout_seconds),
        format!("Output File: {}", config.output_file),
        format!("Output Dir: {}", config.output_dir.display()),
        format!("Color Output: {}", config.enable_color),
        format!("Verbose: {}", config.verbose),
        format!("Debug: {}", config.debug),
    ];

    summary.join("\n")
}
