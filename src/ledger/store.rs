//! Ledger storage (`package: message` lines).

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::outcome::single_line;

/// File name of the ledger inside the working root.
pub const LEDGER_FILE_NAME: &str = "fail.txt";

/// Append-only record of failed packages.
#[derive(Debug, Clone)]
pub struct FailureLedger {
    path: PathBuf,
}

impl FailureLedger {
    /// Create a ledger stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ledger at the default location inside a working root.
    pub fn in_root(root: &Path) -> Self {
        Self::new(root.join(LEDGER_FILE_NAME))
    }

    /// Get the ledger path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `package` has an entry.
    ///
    /// A line matches when its text before the first `:` is exactly
    /// `package`, so `terra: boom` and a hand-written `terra:boom` both count
    /// while `terraform: boom` does not. A missing or unreadable ledger means
    /// "not previously failed".
    pub fn had_failed(&self, package: &str) -> bool {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Could not read {}: {}", self.path.display(), e);
                }
                return false;
            }
        };

        content
            .lines()
            .any(|line| line.split_once(':').is_some_and(|(name, _)| name == package))
    }

    /// Append an entry for `package`.
    ///
    /// Line breaks in the message are flattened so each entry stays on one
    /// line.
    pub fn record(&self, package: &str, message: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {:?}", self.path))?;

        writeln!(file, "{}: {}", package, single_line(message))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_ledger_means_not_failed() {
        let temp = TempDir::new().unwrap();
        let ledger = FailureLedger::in_root(temp.path());

        assert!(!ledger.had_failed("terra"));
    }

    #[test]
    fn recorded_package_had_failed() {
        let temp = TempDir::new().unwrap();
        let ledger = FailureLedger::in_root(temp.path());

        ledger.record("terra", "no archive").unwrap();

        assert!(ledger.had_failed("terra"));
        assert!(!ledger.had_failed("sf"));
    }

    #[test]
    fn match_is_exact_not_prefix() {
        let temp = TempDir::new().unwrap();
        let ledger = FailureLedger::in_root(temp.path());
        ledger.record("ggplot2movies", "boom").unwrap();

        assert!(!ledger.had_failed("ggplot2"));
        assert!(!ledger.had_failed("ggplot2mov"));
    }

    #[test]
    fn match_is_case_sensitive() {
        let temp = TempDir::new().unwrap();
        let ledger = FailureLedger::in_root(temp.path());
        ledger.record("Matrix", "boom").unwrap();

        assert!(!ledger.had_failed("matrix"));
    }

    #[test]
    fn match_scans_every_line() {
        let temp = TempDir::new().unwrap();
        let ledger = FailureLedger::in_root(temp.path());
        fs::write(
            ledger.path(),
            "Seurat: error mentioning terra\nterra: real entry\nbare:\n",
        )
        .unwrap();

        assert!(ledger.had_failed("terra"));
        assert!(ledger.had_failed("Seurat"));
        assert!(ledger.had_failed("bare"));
    }

    #[test]
    fn hand_written_entry_without_space_matches() {
        let temp = TempDir::new().unwrap();
        let ledger = FailureLedger::in_root(temp.path());
        fs::write(ledger.path(), "terra:hand-written entry
").unwrap();

        assert!(ledger.had_failed("terra"));
        assert!(!ledger.had_failed("terr"));
        assert!(!ledger.had_failed("hand-written entry"));
    }

    #[test]
    fn name_ends_at_first_colon() {
        let temp = TempDir::new().unwrap();
        let ledger = FailureLedger::in_root(temp.path());
        fs::write(ledger.path(), "sf:terra: nested
no separator here
").unwrap();

        assert!(ledger.had_failed("sf"));
        assert!(!ledger.had_failed("terra"));
        assert!(!ledger.had_failed("no separator here"));
    }

    #[test]
    fn multi_line_message_stays_one_entry() {
        let temp = TempDir::new().unwrap();
        let ledger = FailureLedger::in_root(temp.path());

        ledger
            .record("sf", "Error in loadNamespace:\n  gdal not found\n")
            .unwrap();

        let content = fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(content, "sf: Error in loadNamespace: gdal not found\n");
    }

    #[test]
    fn unreadable_ledger_means_not_failed() {
        let temp = TempDir::new().unwrap();
        // A directory where the file should be
        fs::create_dir_all(temp.path().join(LEDGER_FILE_NAME)).unwrap();
        let ledger = FailureLedger::in_root(temp.path());

        assert!(!ledger.had_failed("terra"));
        assert!(ledger.record("terra", "x").is_err());
    }
}
