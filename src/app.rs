//! Main application orchestration and execution

use crate::{
    cli::{supports_color, Cli},
    config::{display_config_summary, load_config, validate_config, EnvManager},
    error::Result,
    executor::{ExecutionConfig, ExecutionSummary, TestExecutor},
    logging::LoggerFactory,
    models::{Config, TestSession},
    output::{render_report, ConsoleReporter, ReportWriter},
};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What one invocation produced
#[derive(Debug)]
pub struct RunOutcome {
    pub session: TestSession,
    pub summary: ExecutionSummary,
    /// Where the report landed, `None` when saving failed
    pub saved_to: Option<PathBuf>,
}

/// Main application struct that coordinates all components
pub struct App {
    cli: Cli,
}

impl App {
    /// Create a new application instance with CLI configuration
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load configuration and run every probe against the real network
    pub async fn run(self) -> Result<RunOutcome> {
        let config = load_config(self.cli.clone())?;
        let executor = TestExecutor::system(&config);
        self.run_with(config, executor).await
    }

    /// Run with an already loaded configuration and a prepared executor.
    ///
    /// Fails only before the first probe (invalid host). Probe failures end
    /// up in the report and a failed save is printed, not returned.
    pub async fn run_with(&self, config: Config, executor: TestExecutor) -> Result<RunOutcome> {
        let host = config.hostname()?;
        let use_color = self.use_color(&config);

        if config.debug {
            self.print_debug_banner(&config);
        }

        if config.verbose || config.debug {
            for note in self.startup_warnings(&config, use_color)? {
                println!("{}", note);
            }
        }

        let factory = LoggerFactory::new(config.clone());
        let probe_logger = factory.create_probe_logger().await;
        let console = Arc::new(ConsoleReporter::new(use_color));

        let writer = ReportWriter::new(config.output_dir.clone());
        let mut session = TestSession::new(
            host.clone(),
            writer.report_path(&config.output_file, &Local::now()),
        );

        let plan = ExecutionConfig::from(&config);
        let summary = executor
            .with_logger(probe_logger.clone())
            .with_reporter(console.clone())
            .run(&mut session, &plan.tcp_ports, plan.ping_count)
            .await;

        let report = render_report(host.as_str(), session.results(), &Local::now());
        let saved_to = match writer.save(&session, &report) {
            Ok(path) => {
                println!("\n{}", console.saved_line(&path));
                Some(path)
            }
            Err(e) => {
                eprintln!("Error saving results: {}", e.detail());
                probe_logger.log_error(&e, Some("saving report")).await;
                None
            }
        };

        if config.verbose {
            println!(
                "Completed {} tests in {:.2}s: {} passed, {} failed",
                summary.total_tests,
                summary.total_duration.as_secs_f64(),
                summary.passed_tests,
                summary.failed_tests
            );
        }

        Ok(RunOutcome {
            session,
            summary,
            saved_to,
        })
    }

    /// Advisory configuration warnings followed by problems found in the
    /// `.env` file and the process environment
    pub fn startup_warnings(&self, config: &Config, use_color: bool) -> Result<Vec<String>> {
        let mut notes: Vec<String> = validate_config(config)?
            .iter()
            .map(|warning| warning.format(use_color))
            .collect();
        notes.extend(EnvManager::environment_warnings(Path::new(".env")));
        Ok(notes)
    }

    fn use_color(&self, config: &Config) -> bool {
        self.cli
            .color_override()
            .unwrap_or_else(|| config.enable_color && supports_color())
    }

    fn print_debug_banner(&self, config: &Config) {
        println!("{} v{}", crate::PKG_NAME, crate::VERSION);
        println!("Build: {} ({})", env!("BUILD_TIME"), env!("GIT_COMMIT"));
        println!("Debug mode enabled");
        println!("\n{}", self.cli.get_config_summary());
        println!("Configuration Summary:");
        println!("{}", display_config_summary(config));
        println!("\n{}", EnvManager::display_env_help());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn app() -> App {
        App::new(Cli::parse_from(["network-tester", "127.0.0.1", "--no-color"]))
    }

    #[test]
    fn test_startup_warnings_include_config_checks() {
        let config = Config {
            target_host: "127.0.0.1".to_string(),
            tcp_ports: vec![80, 80],
            ..Config::default()
        };

        let notes = app().startup_warnings(&config, false).unwrap();
        assert!(notes.iter().any(|n| n.starts_with("[INFO] Target 127.0.0.1")));
        assert!(notes.iter().any(|n| n.starts_with("[WARNING] Port 80")));
    }

    #[test]
    fn test_startup_warnings_reject_invalid_config() {
        let config = Config {
            target_host: "127.0.0.1".to_string(),
            ping_count: 0,
            ..Config::default()
        };

        assert!(app().startup_warnings(&config, false).is_err());
    }
}
