//! Package inventories and the difference between two of them.
//!
//! An inventory is the sorted list of package directories in an environment's
//! library. Inventories are persisted as `<version>.txt` in the working root
//! and the migration diff as `missing.txt`, one name per line, so an operator
//! can inspect or hand-edit them between runs.

use crate::environment::Environment;
use crate::error::{InstallError, Result};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Directories with this prefix are R's install lock markers.
pub const LOCK_PREFIX: &str = "00LOCK";

/// Sorted snapshot of the packages in one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    version: String,
    packages: Vec<String>,
}

impl Inventory {
    /// Build an inventory from names, dropping lock markers and sorting
    /// case-insensitively.
    pub fn from_names<I, S>(version: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut packages: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|name| !name.starts_with(LOCK_PREFIX))
            .collect();
        packages.sort_by(|a, b| casefold_cmp(a, b));
        packages.dedup();

        Self {
            version: version.to_string(),
            packages,
        }
    }

    /// Version the snapshot was taken from.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Package names in inventory order.
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    /// File this inventory is persisted to under `root`.
    pub fn path_in(&self, root: &Path) -> PathBuf {
        root.join(format!("{}.txt", self.version))
    }

    /// Write the inventory to `<root>/<version>.txt`.
    pub fn save(&self, root: &Path) -> Result<PathBuf> {
        let path = self.path_in(root);
        fs::write(&path, join_lines(&self.packages))?;
        Ok(path)
    }
}

/// Take a snapshot of an environment's library.
///
/// # Errors
///
/// Returns `LibraryNotFound` when the library directory is missing, since a
/// migration from or into a nonexistent environment makes no sense.
pub fn snapshot(env: &Environment) -> Result<Inventory> {
    let dir = env.library_dir();
    if !dir.is_dir() {
        return Err(InstallError::LibraryNotFound {
            version: env.version().to_string(),
            path: dir.to_path_buf(),
        });
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    let inventory = Inventory::from_names(env.version(), names);
    tracing::debug!(
        "{} packages in {}",
        inventory.packages().len(),
        env.library_dir().display()
    );
    Ok(inventory)
}

/// Packages in an old inventory that a new one lacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryDiff {
    missing: Vec<String>,
}

impl InventoryDiff {
    /// Compute `old - new`, keeping the old inventory's order.
    pub fn between(old: &Inventory, new: &Inventory) -> Self {
        let present: HashSet<&str> = new.packages().iter().map(String::as_str).collect();
        let missing = old
            .packages()
            .iter()
            .filter(|p| !present.contains(p.as_str()))
            .cloned()
            .collect();
        Self { missing }
    }

    /// Missing package names.
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Whether nothing is missing.
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }

    /// Persist the diff, one name per line.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, join_lines(&self.missing))?;
        Ok(())
    }
}

/// Package names to install from a persisted diff.
///
/// Tolerates `diff` output pasted in by hand: a leading `> ` marker is
/// stripped, and lines starting with `<` (left-hand side only) or a digit
/// (hunk headers) are skipped, as are blank lines.
pub fn parse_sweep_entries(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .map(|line| line.strip_prefix("> ").unwrap_or(line).trim())
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with('<'))
        .filter(|line| !line.starts_with(|c: char| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

fn casefold_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn join_lines(lines: &[String]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}
