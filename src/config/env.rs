//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use crate::logging::LogFormat;
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load `.env` from the current directory if present.
    ///
    /// Returns whether a file was loaded. Variables already set in the
    /// process environment win over the file.
    pub fn load_env_file() -> Result<bool> {
        Self::load_env_file_from(Path::new(".env"))
    }

    /// Load a specific env file if it exists
    pub fn load_env_file_from(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }

        dotenv::from_path(path)
            .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;
        Ok(true)
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "TCP_PORTS" => {
                crate::models::config::parse_port_list(value)
                    .map_err(|e| AppError::config(format!("Invalid TCP_PORTS value '{}': {}", value, e.detail())))?;
            }
            "PING_COUNT" => {
                let count: u32 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid PING_COUNT value '{}': {}", value, e)))?;
                if !(crate::defaults::MIN_PING_COUNT..=crate::defaults::MAX_PING_COUNT).contains(&count) {
                    return Err(AppError::config(format!("PING_COUNT must be between 1 and 1000, got: {}", count)));
                }
            }
            "TCP_TIMEOUT_SECONDS" => {
                let timeout: u64 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid TCP_TIMEOUT_SECONDS value '{}': {}", value, e)))?;
                if timeout == 0 || timeout > crate::defaults::MAX_TCP_TIMEOUT_SECS {
                    return Err(AppError::config(format!("TCP_TIMEOUT_SECONDS must be between 1 and 300, got: {}", timeout)));
                }
            }
            "OUTPUT_FILE" => {
                if value.trim().is_empty() {
                    return Err(AppError::config("OUTPUT_FILE cannot be empty"));
                }
            }
            "ENABLE_COLOR" => {
                value.trim().parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", value, e)))?;
            }
            "LOG_FORMAT" => {
                value.parse::<LogFormat>()
                    .map_err(|e| AppError::config(format!("Invalid LOG_FORMAT value '{}': {}", value, e.detail())))?;
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }

        Ok(())
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("TCP_PORTS", "TCP ports to probe, comma separated", "80,443,8080"),
            ("PING_COUNT", "Number of ping packets (1-1000)", "4"),
            ("TCP_TIMEOUT_SECONDS", "TCP connect timeout in seconds (1-300)", "5"),
            ("OUTPUT_FILE", "Report file name", "network_test_results.txt"),
            ("OUTPUT_DIR", "Directory for reports", "output"),
            ("ENABLE_COLOR", "Enable colored output", "true"),
            ("LOG_FORMAT", "Log format on stderr (console/json/compact)", "json"),
        ]
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<20} {}\n", var, description));
            help.push_str(&format!("  {:<20} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }

    /// Validate all currently set environment variables
    pub fn validate_current_env() -> Vec<String> {
        Self::get_supported_env_vars()
            .into_iter()
            .filter_map(|(var_name, _, _)| {
                let value = std::env::var(var_name).ok()?;
                Self::validate_env_var(var_name, &value)
                    .err()
                    .map(|e| format!("Warning: {}", e))
            })
            .collect()
    }

    /// Check an env file's contents line by line
    pub fn check_env_content(content: &str) -> Vec<String> {
        let mut warnings = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match line.split_once('=') {
                Some((key, value)) => {
                    if let Err(e) = Self::validate_env_var(key.trim(), value.trim()) {
                        warnings.push(format!("Line '{}': {}", line, e));
                    }
                }
                None => warnings.push(format!("Line '{}': expected KEY=VALUE", line)),
            }
        }

        warnings
    }

    /// Check if .env file exists and validate its contents
    pub fn check_env_file() -> Result<Option<Vec<String>>> {
        Self::check_env_file_at(Path::new(".env"))
    }

    /// Validate the contents of a specific env file, `None` when missing
    pub fn check_env_file_at(path: &Path) -> Result<Option<Vec<String>>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("Failed to read {}: {}", path.display(), e)))?;

        Ok(Some(Self::check_env_content(&content)))
    }

    /// Problems in the env file at `path` followed by problems in the
    /// process environment
    pub fn environment_warnings(path: &Path) -> Vec<String> {
        let mut warnings = match Self::check_env_file_at(path) {
            Ok(Some(lines)) => lines,
            Ok(None) => Vec::new(),
            Err(e) => vec![format!("Warning: {}", e)],
        };
        warnings.extend(Self::validate_current_env());
        warnings
    }
}
