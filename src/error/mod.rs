//! Error handling for the network tester
//!
//! Only pre-flight problems (invalid host, bad configuration) and unexpected
//! internal failures travel as `AppError` to the top level. Individual probe
//! failures are data: they are folded into the `error` field of a
//! `ProbeResult` and never abort a run.

use thiserror::Error;

/// Custom error types for the network tester
#[derive(Error, Debug)]
pub enum AppError {
    /// Target host failed validation before any network activity
    #[error("Invalid hostname: {0}")]
    InvalidHost(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors for user supplied values other than the host
    #[error("Validation error: {0}")]
    Validation(String),

    /// DNS resolution errors
    #[error("DNS resolution error: {0}")]
    DnsResolution(String),

    /// Network connectivity errors
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// External process errors (ping utility missing, not executable, ...)
    #[error("Process error: {0}")]
    Process(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Parsing errors
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Report persistence errors
    #[error("Report error: {0}")]
    Report(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new invalid host error
    pub fn invalid_host<S: Into<String>>(message: S) -> Self {
        Self::InvalidHost(message.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new DNS resolution error
    pub fn dns_resolution<S: Into<String>>(message: S) -> Self {
        Self::DnsResolution(message.into())
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    /// Create a new process error
    pub fn process<S: Into<String>>(message: S) -> Self {
        Self::Process(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new report error
    pub fn report<S: Into<String>>(message: S) -> Self {
        Self::Report(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidHost(_) => "HOST",
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::DnsResolution(_) => "DNS",
            Self::Network(_) => "NETWORK",
            Self::Timeout(_) => "TIMEOUT",
            Self::Process(_) => "PROCESS",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
            Self::Report(_) => "REPORT",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// The message without the category prefix
    pub fn detail(&self) -> &str {
        match self {
            Self::InvalidHost(msg)
            | Self::Config(msg)
            | Self::Validation(msg)
            | Self::DnsResolution(msg)
            | Self::Network(msg)
            | Self::Timeout(msg)
            | Self::Process(msg)
            | Self::Io(msg)
            | Self::Parse(msg)
            | Self::Report(msg)
            | Self::Internal(msg) => msg,
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidHost(_) | Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1,
            Self::DnsResolution(_) | Self::Network(_) => 2,
            Self::Timeout(_) => 3,
            Self::Process(_) => 4,
            Self::Io(_) | Self::Report(_) => 5,
            Self::Internal(_) => 99,
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::InvalidHost(_) | Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::DnsResolution(_) | Self::Network(_) | Self::Timeout(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Process(_) | Self::Io(_) | Self::Report(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::TimedOut {
            Self::timeout(error.to_string())
        } else {
            Self::io(error.to_string())
        }
    }
}

impl From<trust_dns_resolver::error::ResolveError> for AppError {
    fn from(error: trust_dns_resolver::error::ResolveError) -> Self {
        Self::dns_resolution(error.to_string())
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

impl From<std::str::ParseBoolError> for AppError {
    fn from(error: std::str::ParseBoolError) -> Self {
        Self::parse(format!("Boolean parse error: {}", error))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Error reporter used by the binary for user feedback
pub struct ErrorReporter {
    pub use_color: bool,
    pub verbose: bool,
}

impl ErrorReporter {
    /// Create a new error reporter
    pub fn new(use_color: bool, verbose: bool) -> Self {
        Self { use_color, verbose }
    }

    /// Render the error and, in verbose mode, a hint on what to check
    pub fn render(&self, error: &AppError) -> String {
        let mut output = error.format_for_console(self.use_color);
        if self.verbose {
            if let Some(hint) = Self::hint(error) {
                output.push_str("\n\n");
                output.push_str(hint);
            }
        }
        output
    }

    /// Report an error to the user on stderr
    pub fn report_error(&self, error: &AppError) {
        eprintln!("{}", self.render(error));
    }

    fn hint(error: &AppError) -> Option<&'static str> {
        match error {
            AppError::InvalidHost(_) => Some(
                "Hostnames may only contain letters, digits, '.', '-' and '_' (at most 253 characters).",
            ),
            AppError::Config(_) | AppError::Validation(_) => Some(
                "Check your .env file and command line arguments (ping count 1-1000, ports 1-65535).",
            ),
            AppError::Io(_) | AppError::Report(_) => {
                Some("Check permissions and free space for the output directory.")
            }
            _ => None,
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}
