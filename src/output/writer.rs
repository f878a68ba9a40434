//! Report persistence
//!
//! Reports land in the output directory under a timestamped name derived
//! from the user-supplied file name. Only the base name of that value is
//! used, so `../../etc/passwd` becomes `output/passwd_<ts>`.

use crate::{
    defaults::DEFAULT_OUTPUT_FILE,
    error::{AppError, Result},
    models::TestSession,
};
use chrono::{DateTime, Local};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

/// Timestamp layout embedded in report file names
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Writes rendered reports to disk
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `<output_dir>/<stem>_<YYYYMMDD_HHMMSS><.ext>` for the given file name
    pub fn report_path(&self, requested: &str, now: &DateTime<Local>) -> PathBuf {
        self.output_dir.join(timestamped_file_name(requested, now))
    }

    /// Write `contents` to the session's output path.
    ///
    /// The directory is created when missing. Data goes to a temporary
    /// sibling first and is renamed into place, so a failed write never
    /// leaves a truncated report behind.
    pub fn save(&self, session: &TestSession, contents: &str) -> Result<PathBuf> {
        let target = session.output_path();
        write_atomically(target, contents)?;
        Ok(target.to_path_buf())
    }
}

/// Base name of `requested` with the timestamp inserted before the
/// extension
pub fn timestamped_file_name(requested: &str, now: &DateTime<Local>) -> String {
    let base = Path::new(requested.trim())
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string());

    let base_path = Path::new(&base);
    let stem = base_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let timestamp = now.format(FILE_TIMESTAMP_FORMAT);

    match base_path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, timestamp, ext.to_string_lossy()),
        None => format!("{}_{}", stem, timestamp),
    }
}

fn write_atomically(target: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::report(format!("cannot create directory {}: {}", parent.display(), e))
        })?;
    }

    let file_name = target
        .file_name()
        .ok_or_else(|| AppError::report(format!("invalid report path: {}", target.display())))?;
    let temp_path = target.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    let written = fs::File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(contents.as_bytes())?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&temp_path, target));

    written.map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        AppError::report(format!("cannot write {}: {}", target.display(), e))
    })
}
