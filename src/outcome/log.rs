//! Outcome log storage.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

/// Date format used in outcome file names.
pub const DATE_FORMAT: &str = "%Y_%m_%d";

/// Flatten a message to one line.
///
/// Each line is trimmed, blank lines are dropped and the rest are joined
/// with single spaces.
pub fn single_line(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writer for `success_<date>.txt` / `failed_<date>.txt` files.
#[derive(Debug, Clone)]
pub struct OutcomeLog {
    dir: PathBuf,
}

impl OutcomeLog {
    /// Create a log writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the log files live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File an outcome on `date` is appended to.
    pub fn path_for(&self, success: bool, date: NaiveDate) -> PathBuf {
        let kind = if success { "success" } else { "failed" };
        self.dir
            .join(format!("{}_{}.txt", kind, date.format(DATE_FORMAT)))
    }

    /// Append a line to today's success or failure file.
    pub fn record(&self, success: bool, message: &str) -> Result<PathBuf> {
        self.record_on(Local::now().date_naive(), success, message)
    }

    /// Append a line to the success or failure file of `date`.
    ///
    /// Multi-line messages are flattened so one call writes one line.
    pub fn record_on(&self, date: NaiveDate, success: bool, message: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory {:?}", self.dir))?;

        let path = self.path_for(success, date);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open {:?}", path))?;

        writeln!(file, "{}", single_line(message))?;
        Ok(path)
    }
}
