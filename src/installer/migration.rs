//! Bulk migration between environment versions.
//!
//! A run snapshots the old and new libraries, writes both inventories and
//! their difference into the working root, then installs, in order, the seed
//! dependencies, the hand-curated version-control packages, and every name
//! in the persisted diff. Each installation goes through the orchestrator
//! with the failure ledger honored.
//!
//! The diff is read back from disk before the sweep so an operator can edit
//! `missing.txt` and re-run.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{MigrationConfig, VcsPackage};
use crate::environment::{parse_sweep_entries, snapshot, Environment, InventoryDiff};
use crate::error::Result;
use crate::outcome::OutcomeLog;
use crate::ui::UserInterface;

use super::{log_outcome, InstallOrchestrator, InstallOutcome, InstallRequest, InstallState};

/// File name of the persisted inventory diff.
pub const DIFF_FILE_NAME: &str = "missing.txt";

/// Summary of a migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Packages in the old environment the new one lacked.
    pub missing: Vec<String>,
    /// Packages a strategy installed.
    pub installed: usize,
    /// Packages that were already usable.
    pub already_present: usize,
    /// Packages skipped because of the ledger.
    pub skipped: usize,
    /// Packages whose route was exhausted.
    pub failed: usize,
}

impl MigrationReport {
    fn count(&mut self, outcome: &InstallOutcome) {
        match outcome.state {
            InstallState::AlreadyInstalled => self.already_present += 1,
            InstallState::KnownFailed => self.skipped += 1,
            InstallState::Installed(_) => self.installed += 1,
            InstallState::Exhausted => self.failed += 1,
        }
    }

    /// Total install requests made.
    pub fn total(&self) -> usize {
        self.installed + self.already_present + self.skipped + self.failed
    }
}

/// A migration from one environment into another.
pub struct Migration<'a> {
    orchestrator: &'a InstallOrchestrator<'a>,
    root: PathBuf,
    log: OutcomeLog,
    seed_packages: Vec<String>,
    vcs_packages: Vec<VcsPackage>,
}

impl<'a> Migration<'a> {
    /// Create a migration writing its files under `root`.
    pub fn new(
        orchestrator: &'a InstallOrchestrator<'a>,
        root: &Path,
        config: &MigrationConfig,
    ) -> Self {
        Self {
            orchestrator,
            root: root.to_path_buf(),
            log: OutcomeLog::new(root),
            seed_packages: config.seed_packages.clone(),
            vcs_packages: config.vcs_packages.clone(),
        }
    }

    /// Path of the persisted diff.
    pub fn diff_path(&self) -> PathBuf {
        self.root.join(DIFF_FILE_NAME)
    }

    /// Run the migration from `old` into `new`.
    ///
    /// # Errors
    ///
    /// Fails when either library is missing or the inventory files cannot be
    /// written. Per-package failures never abort the run.
    pub fn run(
        &self,
        new: &Environment,
        old: &Environment,
        ui: &mut dyn UserInterface,
    ) -> Result<MigrationReport> {
        ui.show_header(&format!("Migrating packages from {} to {}", old, new));

        let new_inventory = snapshot(new)?;
        let old_inventory = snapshot(old)?;
        fs::create_dir_all(&self.root)?;
        new_inventory.save(&self.root)?;
        old_inventory.save(&self.root)?;

        let diff = InventoryDiff::between(&old_inventory, &new_inventory);
        diff.save(&self.diff_path())?;
        tracing::info!(
            "{} packages in {} missing from {}",
            diff.missing().len(),
            old,
            new
        );

        let mut report = MigrationReport {
            missing: diff.missing().to_vec(),
            ..Default::default()
        };

        ui.message(&format!(
            "Installing {} seed dependencies",
            self.seed_packages.len()
        ));
        for package in &self.seed_packages {
            self.install(new, InstallRequest::new(package.as_str()), ui, &mut report);
        }

        ui.message(&format!(
            "Installing {} version-control packages",
            self.vcs_packages.len()
        ));
        for vcs in &self.vcs_packages {
            let request = InstallRequest::new(vcs.name.as_str()).with_repo(vcs.repo.as_str());
            self.install(new, request, ui, &mut report);
        }

        let sweep = parse_sweep_entries(&fs::read_to_string(self.diff_path())?);
        ui.message(&format!(
            "Installing {} packages missing from {}",
            sweep.len(),
            new
        ));
        for package in sweep {
            self.install(new, InstallRequest::new(package), ui, &mut report);
        }

        Ok(report)
    }

    fn install(
        &self,
        env: &Environment,
        request: InstallRequest,
        ui: &mut dyn UserInterface,
        report: &mut MigrationReport,
    ) {
        let outcome = self.orchestrator.install_package(env, &request, ui);
        log_outcome(&self.log, request.package(), &outcome);
        report.count(&outcome);
    }
}
