//! Migrate command implementation.
//!
//! `rinstall --migrate` reconciles the old environment's packages into the
//! new one and prints a summary.

use crate::environment::RuntimeProbe;
use crate::error::Result;
use crate::installer::{InstallOrchestrator, Migration, MigrationReport};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::workspace::Workspace;

/// The migrate command implementation.
pub struct MigrateCommand<'a> {
    workspace: &'a Workspace,
    new_version: String,
    old_version: String,
}

impl<'a> MigrateCommand<'a> {
    /// Create a new migrate command.
    pub fn new(workspace: &'a Workspace, new_version: &str, old_version: &str) -> Self {
        Self {
            workspace,
            new_version: new_version.to_string(),
            old_version: old_version.to_string(),
        }
    }
}

impl Command for MigrateCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ws = self.workspace;
        let new = ws.environment(&self.new_version);
        let old = ws.environment(&self.old_version);

        let runtime = ws.runtime();
        let probe = RuntimeProbe::new(&runtime);
        let orchestrator = InstallOrchestrator::new(&runtime, &probe, ws.ledger(), ws.chain()?);
        let migration = Migration::new(&orchestrator, ws.root(), &ws.config().migration);

        let report = migration.run(&new, &old, ui)?;
        show_summary(ui, &report, &new.to_string(), ws);

        Ok(CommandResult::success())
    }
}

fn show_summary(ui: &mut dyn UserInterface, report: &MigrationReport, env: &str, ws: &Workspace) {
    ui.message(&format!(
        "{} packages were missing from {}",
        report.missing.len(),
        env
    ));
    ui.success(&format!(
        "Migration into {} finished: {} installed, {} already present, {} skipped, {} failed",
        env, report.installed, report.already_present, report.skipped, report.failed
    ));
    if report.failed > 0 {
        ui.warning(&format!(
            "{} packages could not be installed, see {}",
            report.failed,
            ws.ledger().path().display()
        ));
    }
}
