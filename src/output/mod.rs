//! Report rendering, persistence and console progress
//!
//! The report is rendered to a deterministic plain-text document and
//! written atomically into the output directory. Progress lines are
//! printed while the probes run, optionally colored.

mod console;
mod report;
mod writer;

pub use console::{ColorScheme, ConsoleReporter, PerformanceLevel};
pub use report::{format_float, render_report, TIMESTAMP_FORMAT};
pub use writer::{timestamped_file_name, ReportWriter, FILE_TIMESTAMP_FORMAT};
