//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing the CLI flags to commands

use std::path::PathBuf;

use crate::cli::args::Cli;
use crate::error::Result;
use crate::ui::UserInterface;

use super::install::InstallCommand;
use super::migrate::MigrateCommand;
use super::workspace::Workspace;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches the requested actions to their commands.
pub struct CommandDispatcher {
    cwd: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher resolving relative lookups against `cwd`.
    pub fn new(cwd: PathBuf) -> Self {
        Self { cwd }
    }

    /// Dispatch and execute the requested actions.
    ///
    /// With no action a usage hint is shown. A migration runs before an
    /// ad-hoc install; a failed migration stops the run.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if let (None, Some(repo)) = (&cli.install, &cli.git_repo) {
            tracing::debug!("Ignoring --git-repo {} without --install", repo);
        }

        if !cli.has_action() {
            ui.message("Nothing to do. Pass --migrate to migrate packages from --vold into --vnew,");
            ui.message("or --install PACKAGE [--git-repo ORG/REPO] to install a single package.");
            return Ok(CommandResult::success());
        }

        let workspace = Workspace::resolve(cli, &self.cwd)?;
        let defaults = &workspace.config().defaults;
        let new_version = cli.vnew.clone().unwrap_or_else(|| defaults.new_version.clone());
        let old_version = cli.vold.clone().unwrap_or_else(|| defaults.old_version.clone());

        if cli.migrate {
            let cmd = MigrateCommand::new(&workspace, &new_version, &old_version);
            let result = cmd.execute(ui)?;
            if !result.success {
                return Ok(result);
            }
        }

        if let Some(package) = &cli.install {
            let cmd = InstallCommand::new(&workspace, &new_version, package, cli.git_repo.clone());
            return cmd.execute(ui);
        }

        Ok(CommandResult::success())
    }
}
